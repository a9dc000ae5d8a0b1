//! User service for user management

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::storage::{missing, Storage};
use crate::domain::team::Team;
use crate::domain::user::{User, UserId, UserValidationError};
use crate::domain::{DomainError, MembershipRepository};

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub display_name: String,
}

/// Request for updating a user.
///
/// `name` must repeat the stored name; only the display name changes.
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub name: String,
    pub display_name: String,
}

/// User service for managing users and looking up their teams
pub struct UserService {
    users: Arc<dyn Storage<User>>,
    teams: Arc<dyn Storage<Team>>,
    memberships: Arc<dyn MembershipRepository>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("users", &self.users)
            .field("teams", &self.teams)
            .finish_non_exhaustive()
    }
}

fn parse_user_id(id: &str) -> Result<UserId, DomainError> {
    UserId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))
}

impl UserService {
    /// Create a new user service
    pub fn new(
        users: Arc<dyn Storage<User>>,
        teams: Arc<dyn Storage<Team>>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            users,
            teams,
            memberships,
        }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        info!(name = %request.name, "Creating user");

        let user = User::new(request.name, request.display_name)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.users.create(user).await
    }

    /// Get a user by ID
    pub async fn get(&self, id: &str) -> Result<User, DomainError> {
        let user_id = parse_user_id(id)?;
        self.find(&user_id).await
    }

    async fn find(&self, user_id: &UserId) -> Result<User, DomainError> {
        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| missing::<User>(user_id))
    }

    /// List all users in creation order
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.users.list().await
    }

    /// Update the display name of a user
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        info!(id = %id, "Updating user");

        let user_id = parse_user_id(id)?;
        let mut user = self.find(&user_id).await?;

        if request.name != user.name() {
            return Err(DomainError::validation(
                UserValidationError::NameImmutable.to_string(),
            ));
        }

        user.set_display_name(request.display_name)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.users.update(user).await
    }

    /// List the teams a user belongs to, in the order they were joined
    pub async fn list_teams(&self, id: &str) -> Result<Vec<Team>, DomainError> {
        let user_id = parse_user_id(id)?;
        self.find(&user_id).await?;

        let mut teams = Vec::new();
        for team_id in self.memberships.team_ids(&user_id).await? {
            match self.teams.get(&team_id).await? {
                Some(team) => teams.push(team),
                None => debug!(team_id = %team_id, "Skipping membership of missing team"),
            }
        }

        Ok(teams)
    }
}
