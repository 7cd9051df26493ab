use thiserror::Error;

/// Failure classification for response decoding.
///
/// Decoding never panics and never partially fills an output value: a
/// decoder either returns a fully-populated struct or one of these codes.
/// Retry and recovery decisions belong to the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid JSON format")]
    InvalidJson,

    #[error("Missing required field")]
    MissingField,

    #[error("Invalid protocol version")]
    InvalidVersion,

    #[error("Invalid message type")]
    InvalidType,

    #[error("Invalid payload")]
    InvalidPayload,
}

/// Failure classification for message and field validation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid protocol version")]
    InvalidVersion,

    #[error("Invalid message type")]
    InvalidType,

    #[error("Missing required field")]
    MissingRequiredField,

    #[error("Invalid field value")]
    InvalidFieldValue,

    #[error("Invalid JSON format")]
    InvalidJson,

    #[error("Payload too large")]
    PayloadTooLarge,
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
pub type ValidationResult = std::result::Result<(), ValidationError>;
