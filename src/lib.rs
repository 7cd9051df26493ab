//! # Fellowship
//!
//! Friend-list synchronization for game-client plugins: friends,
//! presence, notes, and mail kept in step with a remote HTTP service.
//!
//! ## Components
//!
//! - `fellowship-protocol`: wire envelope encoding and decoding, version
//!   compatibility, validation, headers, and the transport seam
//!
//! ## Example
//!
//! See the crate documentation of [`protocol`] for usage examples.

pub use fellowship_protocol as protocol;
