//! # Fellowship Protocol
//!
//! Wire protocol for the fellowship friend-list sync service.
//!
//! This crate provides:
//! - Envelope types and the closed request/response type sets, including
//!   the legacy response-type alias table
//! - Canonical request encoding for every supported operation
//! - Permissive response decoding that normalizes several historical
//!   server response shapes into one canonical payload form
//! - Protocol version parsing and the same-major compatibility gate
//! - Message, character-name, and friend-list validation
//! - HTTP header construction and the transport seam
//!
//! The wire format is a small JSON envelope read and written by direct
//! substring scanning (`json` module); the crate deliberately has no JSON
//! parser dependency on the wire path.
//!
//! Everything here is pure and synchronous: no global state, no caches,
//! no I/O. Concurrent callers can encode and decode independently without
//! coordination.
//!
//! ## Example
//!
//! ```
//! use fellowship_protocol::{decoder, encoder, DecodeError, ResponseType};
//!
//! // Encode an outbound request.
//! let request = encoder::encode_get_status("Ayla");
//! assert!(request.contains("\"type\":\"GetStatus\""));
//!
//! // Decode a (legacy-shaped) server response.
//! let body = r#"{"protocolVersion":"2.0.0","type":"FriendsListResponse","success":true,"friends":[]}"#;
//! let response = decoder::decode(body).unwrap();
//! assert_eq!(response.kind, ResponseType::FriendList);
//! assert_eq!(response.payload, r#"{"statuses":[]}"#);
//!
//! // Malformed input is a result code, never a panic.
//! assert_eq!(decoder::decode("{nope"), Err(DecodeError::InvalidJson));
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod headers;
pub mod json;
pub mod messages;
pub mod transport;
pub mod validator;
pub mod version;

pub use error::{DecodeError, ValidationError};
pub use messages::{
    FeedbackPayload, Friend, FriendData, FriendListPayload, FriendRequestData,
    FriendRequestsPayload, FriendStatusData, FriendViewSettings, HeartbeatPayload, IssuePayload,
    MailListPayload, MailMessageData, MailUnreadCountPayload, NoteData, NotePayload,
    NotesListPayload, Preferences, PreferencesPayload, Presence, RequestMessage, RequestType,
    ResponseMessage, ResponseType, StatusPayload,
};
pub use transport::{HttpMethod, MemoryTransport, Transport, TransportResponse};
pub use version::{current_version, Version, PROTOCOL_VERSION};
