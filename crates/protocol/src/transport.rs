//! Transport layer abstraction for the fellowship sync client
//!
//! The protocol layer never performs I/O itself: it encodes a request
//! body, hands it to a [`Transport`], and decodes whatever comes back.
//! This trait is the seam that keeps the protocol testable without a
//! network and lets embedders plug in whatever HTTP stack their host
//! environment provides.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

/// HTTP verbs the sync service uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a transport hands back for one request.
///
/// `error` is for transport-level failures (connection refused, timeout);
/// protocol-level failures arrive as a decodable body with
/// `success: false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    pub status_code: u16,
    pub body: String,
    pub error: Option<String>,
}

impl TransportResponse {
    /// A successful response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
            error: None,
        }
    }
}

/// Transport abstraction for talking to the sync service.
///
/// Implementations must be shareable across threads; the protocol layer
/// itself keeps no state between calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns the raw response.
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        api_key: &str,
        character_name: &str,
        body: &str,
    ) -> TransportResponse;
}

/// One request as seen by [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRequest {
    pub method: HttpMethod,
    pub url: String,
    pub api_key: String,
    pub character_name: String,
    pub body: String,
}

/// In-memory transport with scripted responses.
///
/// Responses are served in FIFO order; every request is recorded for
/// later inspection. Sending with no scripted response left returns a
/// transport error rather than blocking.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    sent: Mutex<Vec<SentRequest>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next response to serve.
    pub fn push_response(&self, response: TransportResponse) {
        self.responses
            .lock()
            .expect("response queue poisoned")
            .push_back(response);
    }

    /// Returns a copy of every request sent so far.
    pub fn sent_requests(&self) -> Vec<SentRequest> {
        self.sent.lock().expect("sent log poisoned").clone()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        api_key: &str,
        character_name: &str,
        body: &str,
    ) -> TransportResponse {
        self.sent.lock().expect("sent log poisoned").push(SentRequest {
            method,
            url: url.to_string(),
            api_key: api_key.to_string(),
            character_name: character_name.to_string(),
            body: body.to_string(),
        });

        self.responses
            .lock()
            .expect("response queue poisoned")
            .pop_front()
            .unwrap_or(TransportResponse {
                status_code: 0,
                body: String::new(),
                error: Some("no scripted response".to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_transport_serves_in_order() {
        let transport = MemoryTransport::new();
        transport.push_response(TransportResponse::ok("first"));
        transport.push_response(TransportResponse::ok("second"));

        let a = transport
            .send(HttpMethod::Get, "/api/friends", "key", "Ayla", "")
            .await;
        let b = transport
            .send(HttpMethod::Post, "/api/mail", "key", "Ayla", "{}")
            .await;

        assert_eq!(a.body, "first");
        assert_eq!(b.body, "second");

        let sent = transport.sent_requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].url, "/api/friends");
        assert_eq!(sent[1].method, HttpMethod::Post);
        assert_eq!(sent[1].body, "{}");
    }

    #[tokio::test]
    async fn test_memory_transport_exhausted_is_an_error() {
        let transport = MemoryTransport::new();
        let response = transport
            .send(HttpMethod::Get, "/api/notes", "key", "Ayla", "")
            .await;
        assert_eq!(response.status_code, 0);
        assert!(response.error.is_some());
    }

    #[test]
    fn test_http_method_strings() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
    }
}
