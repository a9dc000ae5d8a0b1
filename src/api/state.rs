//! Application state for shared services

use std::sync::Arc;

use crate::domain::team::Team;
use crate::domain::user::{User, UserId};
use crate::domain::DomainError;
use crate::infrastructure::storage::Repositories;
use crate::infrastructure::team::{CreateTeamRequest, TeamMember, TeamService, UpdateTeamRequest};
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub team_service: Arc<dyn TeamServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    pub fn new(
        team_service: Arc<dyn TeamServiceTrait>,
        user_service: Arc<dyn UserServiceTrait>,
    ) -> Self {
        Self {
            team_service,
            user_service,
        }
    }

    /// Wire both services over one set of stores
    pub fn from_repositories(repos: Repositories) -> Self {
        let team_service = TeamService::new(
            repos.teams.clone(),
            repos.users.clone(),
            repos.memberships.clone(),
        );
        let user_service = UserService::new(repos.users, repos.teams, repos.memberships);

        Self::new(Arc::new(team_service), Arc::new(user_service))
    }
}

/// Trait for team service operations
#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError>;
    async fn get(&self, id: &str) -> Result<Team, DomainError>;
    async fn list(&self) -> Result<Vec<Team>, DomainError>;
    async fn update(&self, id: &str, request: UpdateTeamRequest) -> Result<Team, DomainError>;
    async fn add_users(&self, id: &str, user_ids: &[String]) -> Result<Vec<UserId>, DomainError>;
    async fn list_users(&self, id: &str) -> Result<Vec<TeamMember>, DomainError>;
    async fn remove_users(&self, id: &str, user_ids: &[String])
        -> Result<Vec<UserId>, DomainError>;
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn get(&self, id: &str) -> Result<User, DomainError>;
    async fn list(&self) -> Result<Vec<User>, DomainError>;
    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError>;
    async fn list_teams(&self, id: &str) -> Result<Vec<Team>, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl TeamServiceTrait for TeamService {
    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        TeamService::create(self, request).await
    }

    async fn get(&self, id: &str) -> Result<Team, DomainError> {
        TeamService::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        TeamService::list(self).await
    }

    async fn update(&self, id: &str, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        TeamService::update(self, id, request).await
    }

    async fn add_users(&self, id: &str, user_ids: &[String]) -> Result<Vec<UserId>, DomainError> {
        TeamService::add_users(self, id, user_ids).await
    }

    async fn list_users(&self, id: &str) -> Result<Vec<TeamMember>, DomainError> {
        TeamService::list_users(self, id).await
    }

    async fn remove_users(
        &self,
        id: &str,
        user_ids: &[String],
    ) -> Result<Vec<UserId>, DomainError> {
        TeamService::remove_users(self, id, user_ids).await
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn get(&self, id: &str) -> Result<User, DomainError> {
        UserService::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        UserService::list(self).await
    }

    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        UserService::update(self, id, request).await
    }

    async fn list_teams(&self, id: &str) -> Result<Vec<Team>, DomainError> {
        UserService::list_teams(self, id).await
    }
}
