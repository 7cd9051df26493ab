//! HTTP header construction for sync-service requests
//!
//! Every request to the service carries the same small header set built
//! from a [`RequestContext`]. Building is pure; the transport decides how
//! the headers are actually attached.

use crate::version::PROTOCOL_VERSION;

pub const HEADER_API_KEY: &str = "X-API-Key";
pub const HEADER_CHARACTER_NAME: &str = "characterName";
pub const HEADER_REALM_ID: &str = "X-Realm-Id";
pub const HEADER_PROTOCOL_VERSION: &str = "X-Protocol-Version";
pub const HEADER_SESSION_ID: &str = "X-Session-Id";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// One header as sent on the wire.
pub type Header = (&'static str, String);

/// Per-request identity and content metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub api_key: String,
    pub character_name: String,
    pub realm_id: String,
    pub session_id: String,
    pub content_type: String,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            character_name: String::new(),
            realm_id: String::new(),
            session_id: String::new(),
            content_type: "application/json".to_string(),
        }
    }
}

/// Builds the ordered header list for a request.
///
/// Headers with an empty context value are skipped; the protocol version
/// header is always present.
pub fn build_header_list(ctx: &RequestContext) -> Vec<Header> {
    let mut headers = Vec::new();

    if !ctx.content_type.is_empty() {
        headers.push((HEADER_CONTENT_TYPE, ctx.content_type.clone()));
    }
    if !ctx.api_key.is_empty() {
        headers.push((HEADER_API_KEY, ctx.api_key.clone()));
    }
    if !ctx.character_name.is_empty() {
        headers.push((HEADER_CHARACTER_NAME, ctx.character_name.clone()));
    }
    if !ctx.realm_id.is_empty() {
        headers.push((HEADER_REALM_ID, ctx.realm_id.clone()));
    }

    headers.push((HEADER_PROTOCOL_VERSION, PROTOCOL_VERSION.to_string()));

    if !ctx.session_id.is_empty() {
        headers.push((HEADER_SESSION_ID, ctx.session_id.clone()));
    }

    headers
}

/// Serializes a header list into a `Name: Value\r\n` block.
pub fn serialize(headers: &[Header]) -> String {
    let mut out = String::new();
    for (name, value) in headers {
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push_str("\r\n");
    }
    out
}

/// Builds and serializes in one step.
pub fn build(ctx: &RequestContext) -> String {
    serialize(&build_header_list(ctx))
}

/// Checks that the header set a request cannot go out without is present.
pub fn has_required_headers(headers: &[Header]) -> bool {
    let mut has_content_type = false;
    let mut has_protocol_version = false;

    for (name, _) in headers {
        if *name == HEADER_CONTENT_TYPE {
            has_content_type = true;
        }
        if *name == HEADER_PROTOCOL_VERSION {
            has_protocol_version = true;
        }
    }

    has_content_type && has_protocol_version
}
