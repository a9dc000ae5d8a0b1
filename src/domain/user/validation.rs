//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID '{0}' is not a valid identifier")]
    InvalidId(String),

    #[error("User name cannot be empty")]
    EmptyName,

    #[error("User name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Display name exceeds maximum length of {0} characters")]
    DisplayNameTooLong(usize),

    #[error("User name cannot be updated")]
    NameImmutable,
}

pub const MAX_USER_NAME_LENGTH: usize = 64;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 64;

/// Validate a user ID (a UUID assigned at creation)
pub fn validate_user_id(id: &str) -> Result<uuid::Uuid, UserValidationError> {
    uuid::Uuid::parse_str(id).map_err(|_| UserValidationError::InvalidId(id.to_string()))
}

/// Validate a user name
///
/// Rules:
/// - Cannot be empty or whitespace only
/// - Maximum 64 characters
pub fn validate_user_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    if name.chars().count() > MAX_USER_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(MAX_USER_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a display name. The same limit applies on create and update.
pub fn validate_display_name(display_name: &str) -> Result<(), UserValidationError> {
    if display_name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(UserValidationError::DisplayNameTooLong(
            MAX_DISPLAY_NAME_LENGTH,
        ));
    }

    Ok(())
}
