//! Team service for team and membership management

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::storage::{missing, Storage};
use crate::domain::team::{Team, TeamId, MAX_USERS_PER_REQUEST};
use crate::domain::user::{User, UserId};
use crate::domain::{DomainError, MembershipRepository};

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: String,
    pub admin: String,
}

/// Request for updating a team; every field is replaced
#[derive(Debug, Clone)]
pub struct UpdateTeamRequest {
    pub name: String,
    pub description: String,
    pub admin: String,
}

/// A user as listed among the members of a team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    pub id: UserId,
    pub name: String,
    pub display_name: String,
}

impl From<User> for TeamMember {
    fn from(user: User) -> Self {
        Self {
            id: user.id().clone(),
            name: user.name().to_string(),
            display_name: user.display_name().to_string(),
        }
    }
}

/// Team service for managing teams and their members
pub struct TeamService {
    teams: Arc<dyn Storage<Team>>,
    users: Arc<dyn Storage<User>>,
    memberships: Arc<dyn MembershipRepository>,
}

impl std::fmt::Debug for TeamService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamService")
            .field("teams", &self.teams)
            .field("users", &self.users)
            .finish_non_exhaustive()
    }
}

fn parse_team_id(id: &str) -> Result<TeamId, DomainError> {
    TeamId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))
}

impl TeamService {
    /// Create a new team service
    pub fn new(
        teams: Arc<dyn Storage<Team>>,
        users: Arc<dyn Storage<User>>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            teams,
            users,
            memberships,
        }
    }

    /// Create a new team
    pub async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        info!(name = %request.name, "Creating team");

        let team = Team::new(request.name, request.description, request.admin)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.teams.create(team).await
    }

    /// Get a team by ID
    pub async fn get(&self, id: &str) -> Result<Team, DomainError> {
        let team_id = parse_team_id(id)?;
        self.find(&team_id).await
    }

    async fn find(&self, team_id: &TeamId) -> Result<Team, DomainError> {
        self.teams
            .get(team_id)
            .await?
            .ok_or_else(|| missing::<Team>(team_id))
    }

    /// List all teams in creation order
    pub async fn list(&self) -> Result<Vec<Team>, DomainError> {
        self.teams.list().await
    }

    /// Replace the name, description and admin of a team
    pub async fn update(&self, id: &str, request: UpdateTeamRequest) -> Result<Team, DomainError> {
        info!(id = %id, "Updating team");

        let team_id = parse_team_id(id)?;
        let mut team = self.find(&team_id).await?;

        team.replace_details(request.name, request.description, request.admin)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.teams.update(team).await
    }

    /// Add users to a team.
    ///
    /// The whole request is rejected when it holds more than `MAX_USERS_PER_REQUEST` ids,
    /// when the team is missing, or when any id does not belong to an existing user.
    /// Returns the users that were not members before.
    pub async fn add_users(
        &self,
        team_id: &str,
        user_ids: &[String],
    ) -> Result<Vec<UserId>, DomainError> {
        if user_ids.len() > MAX_USERS_PER_REQUEST {
            warn!(team_id = %team_id, requested = user_ids.len(), "Too many users in add request");
            return Err(DomainError::capacity(MAX_USERS_PER_REQUEST, user_ids.len()));
        }

        let team_id = parse_team_id(team_id)?;
        self.find(&team_id).await?;

        let user_ids = self.resolve_existing_users(user_ids).await?;

        info!(team_id = %team_id, count = user_ids.len(), "Adding users to team");
        self.memberships.add(&team_id, &user_ids).await
    }

    /// Parse ids and check every one names an existing user
    async fn resolve_existing_users(&self, raw_ids: &[String]) -> Result<Vec<UserId>, DomainError> {
        let mut resolved: Vec<UserId> = Vec::with_capacity(raw_ids.len());
        let mut unknown: Vec<&str> = Vec::new();

        for raw in raw_ids {
            let known = match UserId::new(raw) {
                Ok(id) if self.users.exists(&id).await? => Some(id),
                _ => None,
            };

            match known {
                Some(id) if !resolved.contains(&id) => resolved.push(id),
                Some(_) => {}
                None if !unknown.contains(&raw.as_str()) => unknown.push(raw.as_str()),
                None => {}
            }
        }

        if !unknown.is_empty() {
            return Err(DomainError::validation(format!(
                "Unknown users: {}",
                unknown.join(", ")
            )));
        }

        Ok(resolved)
    }

    /// List the members of a team in the order they joined
    pub async fn list_users(&self, team_id: &str) -> Result<Vec<TeamMember>, DomainError> {
        let team_id = parse_team_id(team_id)?;
        self.find(&team_id).await?;

        let mut members = Vec::new();
        for user_id in self.memberships.user_ids(&team_id).await? {
            match self.users.get(&user_id).await? {
                Some(user) => members.push(TeamMember::from(user)),
                None => debug!(user_id = %user_id, "Skipping membership of missing user"),
            }
        }

        Ok(members)
    }

    /// Remove the listed users from this team only.
    ///
    /// Ids that are not members are ignored. Returns the users actually removed.
    pub async fn remove_users(
        &self,
        team_id: &str,
        user_ids: &[String],
    ) -> Result<Vec<UserId>, DomainError> {
        let team_id = parse_team_id(team_id)?;
        self.find(&team_id).await?;

        // Strings that are not ids cannot be members
        let user_ids: Vec<UserId> = user_ids
            .iter()
            .filter_map(|raw| UserId::new(raw).ok())
            .collect();

        info!(team_id = %team_id, count = user_ids.len(), "Removing users from team");
        self.memberships.remove(&team_id, &user_ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::MockMembershipRepository;
    use crate::infrastructure::membership::InMemoryMembershipRepository;
    use crate::infrastructure::storage::InMemoryStorage;
    use tokio_test::{assert_err, assert_ok};

    struct Fixture {
        service: TeamService,
        users: Arc<InMemoryStorage<User>>,
    }

    fn create_fixture() -> Fixture {
        let users = Arc::new(InMemoryStorage::<User>::new());
        let service = TeamService::new(
            Arc::new(InMemoryStorage::<Team>::new()),
            users.clone(),
            Arc::new(InMemoryMembershipRepository::new()),
        );
        Fixture { service, users }
    }

    fn team_request(name: &str) -> CreateTeamRequest {
        CreateTeamRequest {
            name: name.to_string(),
            description: "A test team".to_string(),
            admin: "admin-user".to_string(),
        }
    }

    async fn add_user(fixture: &Fixture, name: &str) -> String {
        let user = User::new(name, format!("{} display", name)).unwrap();
        let id = user.id().to_string();
        fixture.users.create(user).await.unwrap();
        id
    }

    #[tokio::test]
    async fn test_create_and_get_team() {
        let fixture = create_fixture();

        let team = fixture.service.create(team_request("Platform")).await.unwrap();
        let found = fixture.service.get(team.id().as_str()).await.unwrap();

        assert_eq!(found.name(), "Platform");
        assert_eq!(found.description(), "A test team");
        assert_eq!(found.admin(), "admin-user");
    }

    #[tokio::test]
    async fn test_create_team_invalid_name() {
        let fixture = create_fixture();

        let result = fixture.service.create(team_request("")).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_duplicate_name_keeps_first() {
        let fixture = create_fixture();

        let first = fixture.service.create(team_request("Platform")).await.unwrap();

        let mut second = team_request("Platform");
        second.description = "Other".to_string();
        let result = fixture.service.create(second).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));

        let teams = fixture.service.list().await.unwrap();
        assert_eq!(teams, vec![first]);
    }

    #[tokio::test]
    async fn test_get_unknown_team() {
        let fixture = create_fixture();

        let result = fixture.service.get(&TeamId::generate().to_string()).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));

        let result = fixture.service.get("not-a-uuid").await;
        assert!(matches!(result, Err(DomainError::InvalidId { .. })));
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_creation_time() {
        let fixture = create_fixture();
        let team = fixture.service.create(team_request("Platform")).await.unwrap();

        let updated = fixture
            .service
            .update(
                team.id().as_str(),
                UpdateTeamRequest {
                    name: "Infrastructure".to_string(),
                    description: "Renamed".to_string(),
                    admin: "other-admin".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id(), team.id());
        assert_eq!(updated.creation_time(), team.creation_time());
        assert_eq!(updated.name(), "Infrastructure");
        assert_eq!(updated.admin(), "other-admin");
    }

    #[tokio::test]
    async fn test_update_to_taken_name() {
        let fixture = create_fixture();
        fixture.service.create(team_request("Platform")).await.unwrap();
        let other = fixture.service.create(team_request("Data")).await.unwrap();

        let result = fixture
            .service
            .update(
                other.id().as_str(),
                UpdateTeamRequest {
                    name: "Platform".to_string(),
                    description: String::new(),
                    admin: "admin-user".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(fixture.service.get(other.id().as_str()).await.unwrap().name(), "Data");
    }

    #[tokio::test]
    async fn test_update_keeping_own_name() {
        let fixture = create_fixture();
        let team = fixture.service.create(team_request("Platform")).await.unwrap();

        let result = fixture
            .service
            .update(
                team.id().as_str(),
                UpdateTeamRequest {
                    name: "Platform".to_string(),
                    description: "Same name".to_string(),
                    admin: "admin-user".to_string(),
                },
            )
            .await;

        assert_ok!(result);
    }

    #[tokio::test]
    async fn test_add_and_list_users() {
        let fixture = create_fixture();
        let team = fixture.service.create(team_request("Platform")).await.unwrap();
        let alice = add_user(&fixture, "alice").await;
        let bob = add_user(&fixture, "bob").await;

        let added = fixture
            .service
            .add_users(team.id().as_str(), &[alice.clone(), bob.clone(), alice.clone()])
            .await
            .unwrap();
        assert_eq!(added.len(), 2);

        let members = fixture.service.list_users(team.id().as_str()).await.unwrap();
        let ids: Vec<String> = members.iter().map(|m| m.id.to_string()).collect();
        assert_eq!(ids, vec![alice, bob]);
        assert_eq!(members[0].name, "alice");
        assert_eq!(members[0].display_name, "alice display");
    }

    #[tokio::test]
    async fn test_add_existing_member_is_noop() {
        let fixture = create_fixture();
        let team = fixture.service.create(team_request("Platform")).await.unwrap();
        let alice = add_user(&fixture, "alice").await;

        fixture
            .service
            .add_users(team.id().as_str(), &[alice.clone()])
            .await
            .unwrap();
        let added = fixture
            .service
            .add_users(team.id().as_str(), &[alice])
            .await
            .unwrap();

        assert!(added.is_empty());
        assert_eq!(fixture.service.list_users(team.id().as_str()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_over_capacity_persists_nothing() {
        let fixture = create_fixture();
        let team = fixture.service.create(team_request("Platform")).await.unwrap();

        let mut ids = Vec::new();
        for i in 0..=MAX_USERS_PER_REQUEST {
            ids.push(add_user(&fixture, &format!("user-{}", i)).await);
        }

        let result = fixture.service.add_users(team.id().as_str(), &ids).await;
        match result {
            Err(DomainError::Capacity { limit, requested }) => {
                assert_eq!(limit, 50);
                assert_eq!(requested, 51);
            }
            other => panic!("expected capacity error, got {:?}", other),
        }

        assert!(fixture.service.list_users(team.id().as_str()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_users_persists_nothing() {
        let fixture = create_fixture();
        let team = fixture.service.create(team_request("Platform")).await.unwrap();
        let alice = add_user(&fixture, "alice").await;
        let ghost = UserId::generate().to_string();

        let result = fixture
            .service
            .add_users(team.id().as_str(), &[alice, ghost.clone(), "bogus".to_string()])
            .await;

        match result {
            Err(DomainError::Validation { message }) => {
                assert!(message.contains(&ghost));
                assert!(message.contains("bogus"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        assert!(fixture.service.list_users(team.id().as_str()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_users_to_unknown_team() {
        let fixture = create_fixture();
        let alice = add_user(&fixture, "alice").await;

        let result = fixture
            .service
            .add_users(&TeamId::generate().to_string(), &[alice])
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_users_only_from_given_team() {
        let fixture = create_fixture();
        let platform = fixture.service.create(team_request("Platform")).await.unwrap();
        let data = fixture.service.create(team_request("Data")).await.unwrap();
        let alice = add_user(&fixture, "alice").await;
        let bob = add_user(&fixture, "bob").await;

        let both = [alice.clone(), bob.clone()];
        fixture.service.add_users(platform.id().as_str(), &both).await.unwrap();
        fixture.service.add_users(data.id().as_str(), &both).await.unwrap();

        let removed = fixture
            .service
            .remove_users(platform.id().as_str(), &[alice.clone(), "bogus".to_string()])
            .await
            .unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].to_string(), alice);

        let platform_members = fixture.service.list_users(platform.id().as_str()).await.unwrap();
        assert_eq!(platform_members.len(), 1);
        assert_eq!(platform_members[0].id.to_string(), bob);

        let data_members = fixture.service.list_users(data.id().as_str()).await.unwrap();
        assert_eq!(data_members.len(), 2);
    }

    #[tokio::test]
    async fn test_list_users_unknown_team() {
        let fixture = create_fixture();

        let result = fixture.service.list_users(&TeamId::generate().to_string()).await;
        assert_err!(result);
    }

    #[tokio::test]
    async fn test_membership_failure_propagates() {
        let users = Arc::new(InMemoryStorage::<User>::new());
        let teams = Arc::new(InMemoryStorage::<Team>::new());

        let team = Team::new("Platform", "", "admin").unwrap();
        teams.create(team.clone()).await.unwrap();
        let user = User::new("alice", "Alice").unwrap();
        users.create(user.clone()).await.unwrap();

        let mut memberships = MockMembershipRepository::new();
        memberships
            .expect_add()
            .times(1)
            .returning(|_, _| Err(DomainError::storage("connection reset")));

        let service = TeamService::new(teams, users, Arc::new(memberships));

        let result = service
            .add_users(team.id().as_str(), &[user.id().to_string()])
            .await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_capacity_checked_before_storage() {
        let mut memberships = MockMembershipRepository::new();
        memberships.expect_add().never();

        let service = TeamService::new(
            Arc::new(InMemoryStorage::<Team>::new()),
            Arc::new(InMemoryStorage::<User>::new()),
            Arc::new(memberships),
        );

        let ids: Vec<String> = (0..=MAX_USERS_PER_REQUEST).map(|i| i.to_string()).collect();
        let result = service.add_users("not-even-an-id", &ids).await;

        assert!(matches!(result, Err(DomainError::Capacity { .. })));
    }
}
