//! Message and field validation for the fellowship wire protocol
//!
//! Pure checks applied on both the send and receive paths. Everything
//! here returns a [`ValidationResult`]; nothing panics or logs.

use crate::error::{ValidationError, ValidationResult};
use crate::messages::{RequestMessage, ResponseMessage};
use crate::version::{current_version, Version};

/// Upper bound on friend-list entries accepted for upload.
pub const MAX_FRIEND_LIST_SIZE: usize = 1000;

/// Upper bound on character-name length.
pub const MAX_CHARACTER_NAME_LENGTH: usize = 16;

/// Upper bound on payload size, in bytes.
pub const MAX_JSON_SIZE: usize = 1024 * 1024;

/// Validates an outbound request: compatible version and payload within
/// the size ceiling. The request kind is a closed enum and always known.
pub fn validate_request(request: &RequestMessage) -> ValidationResult {
    validate_version(&request.protocol_version)?;

    if request.payload.len() > MAX_JSON_SIZE {
        return Err(ValidationError::PayloadTooLarge);
    }

    Ok(())
}

/// Validates a decoded response the same way as [`validate_request`].
pub fn validate_response(response: &ResponseMessage) -> ValidationResult {
    validate_version(&response.protocol_version)?;

    if response.payload.len() > MAX_JSON_SIZE {
        return Err(ValidationError::PayloadTooLarge);
    }

    Ok(())
}

/// Validates a protocol version string: present, parseable, and
/// major-compatible with the current version.
pub fn validate_version(version: &str) -> ValidationResult {
    if version.is_empty() {
        return Err(ValidationError::MissingRequiredField);
    }

    let parsed = Version::parse(version).map_err(|_| ValidationError::InvalidVersion)?;
    if !parsed.is_compatible_with(&current_version()) {
        return Err(ValidationError::InvalidVersion);
    }

    Ok(())
}

/// Validates a character name: non-empty, at most
/// [`MAX_CHARACTER_NAME_LENGTH`] characters, limited to alphanumerics,
/// space, hyphen, and underscore.
pub fn validate_character_name(name: &str) -> ValidationResult {
    if name.is_empty() {
        return Err(ValidationError::MissingRequiredField);
    }

    if name.len() > MAX_CHARACTER_NAME_LENGTH {
        return Err(ValidationError::InvalidFieldValue);
    }

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != ' ' && c != '-' && c != '_' {
            return Err(ValidationError::InvalidFieldValue);
        }
    }

    Ok(())
}

/// Validates the number of friend-list entries.
pub fn validate_friend_list_size(count: usize) -> ValidationResult {
    if count > MAX_FRIEND_LIST_SIZE {
        return Err(ValidationError::InvalidFieldValue);
    }
    Ok(())
}
