//! Team validation utilities

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team ID '{0}' is not a valid identifier")]
    InvalidId(String),

    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Team description exceeds maximum length of {0} characters")]
    DescriptionTooLong(usize),

    #[error("Team admin cannot be empty")]
    EmptyAdmin,
}

pub const MAX_TEAM_NAME_LENGTH: usize = 64;
pub const MAX_TEAM_DESCRIPTION_LENGTH: usize = 128;

/// Validate a team ID
///
/// Team IDs are generated as UUIDs; anything else cannot name a team.
pub fn validate_team_id(id: &str) -> Result<uuid::Uuid, TeamValidationError> {
    uuid::Uuid::parse_str(id).map_err(|_| TeamValidationError::InvalidId(id.to_string()))
}

/// Validate a team name
///
/// Rules:
/// - Cannot be empty or whitespace only
/// - Maximum 64 characters
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a team description (maximum 128 characters, may be empty)
pub fn validate_team_description(description: &str) -> Result<(), TeamValidationError> {
    if description.chars().count() > MAX_TEAM_DESCRIPTION_LENGTH {
        return Err(TeamValidationError::DescriptionTooLong(
            MAX_TEAM_DESCRIPTION_LENGTH,
        ));
    }

    Ok(())
}

/// Validate the admin reference of a team
pub fn validate_team_admin(admin: &str) -> Result<(), TeamValidationError> {
    if admin.trim().is_empty() {
        return Err(TeamValidationError::EmptyAdmin);
    }

    Ok(())
}
