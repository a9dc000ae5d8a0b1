//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    validate_team_admin, validate_team_description, validate_team_id, validate_team_name,
    TeamValidationError,
};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Team identifier - a UUID assigned when the team is created
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    /// Parse a TeamId after validation
    pub fn new(id: impl AsRef<str>) -> Result<Self, TeamValidationError> {
        let uuid = validate_team_id(id.as_ref())?;
        Ok(Self(uuid.to_string()))
    }

    /// Generate a fresh TeamId
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for TeamId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Unique display name
    name: String,
    /// Free-form description
    description: String,
    /// Identifier of the user administering the team
    admin: String,
    /// Creation timestamp, never changes
    creation_time: DateTime<Utc>,
}

impl Team {
    /// Create a new team with a generated id
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        admin: impl Into<String>,
    ) -> Result<Self, TeamValidationError> {
        let name = name.into();
        let description = description.into();
        let admin = admin.into();
        validate_details(&name, &description, &admin)?;

        Ok(Self {
            id: TeamId::generate(),
            name,
            description,
            admin,
            creation_time: Utc::now(),
        })
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn admin(&self) -> &str {
        &self.admin
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    // Mutators

    /// Replace every mutable field at once; id and creation time are kept
    pub fn replace_details(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        admin: impl Into<String>,
    ) -> Result<(), TeamValidationError> {
        let name = name.into();
        let description = description.into();
        let admin = admin.into();
        validate_details(&name, &description, &admin)?;

        self.name = name;
        self.description = description;
        self.admin = admin;
        Ok(())
    }
}

fn validate_details(name: &str, description: &str, admin: &str) -> Result<(), TeamValidationError> {
    validate_team_name(name)?;
    validate_team_description(description)?;
    validate_team_admin(admin)
}

impl StorageEntity for Team {
    type Key = TeamId;

    const KIND: &'static str = "Team";

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn unique_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_valid() {
        let id = TeamId::new("550E8400-E29B-41D4-A716-446655440000").unwrap();
        assert_eq!(id.as_str(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_team_id_invalid() {
        assert!(TeamId::new("").is_err());
        assert!(TeamId::new("team-1").is_err());
    }

    #[test]
    fn test_team_id_generate_is_unique() {
        assert_ne!(TeamId::generate(), TeamId::generate());
        assert!(TeamId::new(TeamId::generate().as_str()).is_ok());
    }

    #[test]
    fn test_team_creation() {
        let team = Team::new("Platform", "Runs the platform", "admin-1").unwrap();

        assert_eq!(team.name(), "Platform");
        assert_eq!(team.description(), "Runs the platform");
        assert_eq!(team.admin(), "admin-1");
        assert_eq!(team.unique_name(), "Platform");
        assert!(team.creation_time() <= Utc::now());
    }

    #[test]
    fn test_team_invalid_details() {
        assert_eq!(
            Team::new("", "desc", "admin").unwrap_err(),
            TeamValidationError::EmptyName
        );
        assert_eq!(
            Team::new("Team", "d".repeat(129), "admin").unwrap_err(),
            TeamValidationError::DescriptionTooLong(128)
        );
        assert_eq!(
            Team::new("Team", "desc", " ").unwrap_err(),
            TeamValidationError::EmptyAdmin
        );
    }

    #[test]
    fn test_replace_details_keeps_identity() {
        let mut team = Team::new("Platform", "Old", "admin-1").unwrap();
        let id = team.id().clone();
        let created = team.creation_time();

        team.replace_details("Infra", "New", "admin-2").unwrap();

        assert_eq!(team.id(), &id);
        assert_eq!(team.creation_time(), created);
        assert_eq!(team.name(), "Infra");
        assert_eq!(team.description(), "New");
        assert_eq!(team.admin(), "admin-2");
    }

    #[test]
    fn test_replace_details_rejects_invalid_without_changes() {
        let mut team = Team::new("Platform", "Old", "admin-1").unwrap();

        assert!(team.replace_details("x".repeat(65), "New", "admin-2").is_err());
        assert_eq!(team.name(), "Platform");
        assert_eq!(team.description(), "Old");
    }

    #[test]
    fn test_team_serde_round_trip() {
        let team = Team::new("Platform", "Runs the platform", "admin-1").unwrap();

        let json = serde_json::to_value(&team).unwrap();
        assert_eq!(json["name"], "Platform");
        assert!(json.get("creation_time").is_some());

        let restored: Team = serde_json::from_value(json).unwrap();
        assert_eq!(restored, team);
    }
}
