//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    validate_display_name, validate_user_id, validate_user_name, UserValidationError,
};
use crate::domain::storage::{StorageEntity, StorageKey};

/// User identifier - a UUID assigned when the user is created
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Parse a UserId after validation
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let uuid = validate_user_id(id.as_ref())?;
        Ok(Self(uuid.to_string()))
    }

    /// Generate a fresh UserId
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for UserId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Unique name, fixed at creation
    name: String,
    /// Name shown to other users
    display_name: String,
    /// Creation timestamp
    creation_time: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated id
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        let display_name = display_name.into();
        validate_user_name(&name)?;
        validate_display_name(&display_name)?;

        Ok(Self {
            id: UserId::generate(),
            name,
            display_name,
            creation_time: Utc::now(),
        })
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    // Mutators

    /// Update the display name
    pub fn set_display_name(
        &mut self,
        display_name: impl Into<String>,
    ) -> Result<(), UserValidationError> {
        let display_name = display_name.into();
        validate_display_name(&display_name)?;
        self.display_name = display_name;
        Ok(())
    }
}

impl StorageEntity for User {
    type Key = UserId;

    const KIND: &'static str = "User";

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn unique_name(&self) -> &str {
        &self.name
    }
}
