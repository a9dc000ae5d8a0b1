//! Team endpoints

use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::fields::{check_fields, deserialize_body, parse_body};
use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, IdPayload, Json, Path};
use crate::domain::team::{Team, MAX_USERS_PER_REQUEST};
use crate::domain::user::UserId;
use crate::infrastructure::team::{CreateTeamRequest, TeamMember, UpdateTeamRequest};

/// Fields accepted when creating or updating a team
pub const TEAM_FIELDS: [&str; 3] = ["name", "description", "admin"];

/// Fields accepted by the membership endpoints
pub const MEMBERSHIP_FIELDS: [&str; 1] = ["users"];

#[derive(Debug, Clone, Deserialize)]
pub struct TeamBody {
    pub name: String,
    pub description: String,
    pub admin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersBody {
    pub users: Vec<String>,
}

/// Team as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub admin: String,
    pub creation_time: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().to_string(),
            name: team.name().to_string(),
            description: team.description().to_string(),
            admin: team.admin().to_string(),
            creation_time: team.creation_time().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamsPayload {
    pub teams: Vec<TeamResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamInfoPayload {
    pub team_info: TeamResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersAddedPayload {
    pub id: String,
    pub users: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembersPayload {
    pub users: Vec<TeamMember>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersRemovedPayload {
    pub users: Vec<String>,
    pub message: String,
}

fn id_strings(ids: &[UserId]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Membership body; the id count is capped before the ids themselves are inspected
fn parse_add_users_body(body: Map<String, Value>) -> Result<UsersBody, ApiError> {
    check_fields(&body, &MEMBERSHIP_FIELDS)?;

    if let Some(Value::Array(ids)) = body.get("users") {
        if ids.len() > MAX_USERS_PER_REQUEST {
            return Err(ApiError::over_capacity(MAX_USERS_PER_REQUEST, ids.len()));
        }
    }

    deserialize_body(body)
}

fn membership_message(action: &str, ids: &[String]) -> String {
    format!("These users have been successfully {}: {}", action, ids.join(", "))
}

/// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<ApiResponse<IdPayload>, ApiError> {
    let body: TeamBody = parse_body(body, &TEAM_FIELDS)?;
    debug!(name = %body.name, "Creating team");

    let team = state
        .team_service
        .create(CreateTeamRequest {
            name: body.name,
            description: body.description,
            admin: body.admin,
        })
        .await?;

    Ok(ApiResponse::created(IdPayload {
        id: team.id().to_string(),
    }))
}

/// GET /api/teams
pub async fn list_teams(
    State(state): State<AppState>,
) -> Result<ApiResponse<TeamsPayload>, ApiError> {
    debug!("Listing teams");

    let teams = state.team_service.list().await?;

    Ok(ApiResponse::ok(TeamsPayload {
        teams: teams.iter().map(TeamResponse::from).collect(),
    }))
}

/// GET /api/teams/{team_id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<ApiResponse<TeamInfoPayload>, ApiError> {
    debug!(team_id = %team_id, "Describing team");

    let team = state.team_service.get(&team_id).await?;

    Ok(ApiResponse::ok(TeamInfoPayload {
        team_info: TeamResponse::from(&team),
    }))
}

/// PUT /api/teams/{team_id}
pub async fn update_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Result<ApiResponse<IdPayload>, ApiError> {
    let body: TeamBody = parse_body(body, &TEAM_FIELDS)?;
    debug!(team_id = %team_id, "Updating team");

    let team = state
        .team_service
        .update(
            &team_id,
            UpdateTeamRequest {
                name: body.name,
                description: body.description,
                admin: body.admin,
            },
        )
        .await?;

    Ok(ApiResponse::created(IdPayload {
        id: team.id().to_string(),
    }))
}

/// POST /api/teams/{team_id}/users
pub async fn add_team_users(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Result<ApiResponse<UsersAddedPayload>, ApiError> {
    let body = parse_add_users_body(body)?;
    debug!(team_id = %team_id, count = body.users.len(), "Adding team users");

    let added = state.team_service.add_users(&team_id, &body.users).await?;
    let users = id_strings(&added);

    Ok(ApiResponse::created(UsersAddedPayload {
        id: team_id,
        message: membership_message("added", &users),
        users,
    }))
}

/// GET /api/teams/{team_id}/users
pub async fn list_team_users(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<ApiResponse<MembersPayload>, ApiError> {
    debug!(team_id = %team_id, "Listing team users");

    let users = state.team_service.list_users(&team_id).await?;

    Ok(ApiResponse::ok(MembersPayload { users }))
}

/// DELETE /api/teams/{team_id}/users
pub async fn remove_team_users(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Result<ApiResponse<UsersRemovedPayload>, ApiError> {
    let body: UsersBody = parse_body(body, &MEMBERSHIP_FIELDS)?;
    debug!(team_id = %team_id, count = body.users.len(), "Removing team users");

    let removed = state.team_service.remove_users(&team_id, &body.users).await?;
    let users = id_strings(&removed);

    Ok(ApiResponse::ok(UsersRemovedPayload {
        message: membership_message("removed", &users),
        users,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_message() {
        let ids = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            membership_message("removed", &ids),
            "These users have been successfully removed: a, b"
        );
    }

    #[test]
    fn test_add_users_cap_checked_before_id_types() {
        let ids: Vec<Value> = (0..=MAX_USERS_PER_REQUEST).map(|i| Value::from(i as u64)).collect();
        let mut body = Map::new();
        body.insert("users".to_string(), Value::Array(ids));

        let err = parse_add_users_body(body).unwrap_err();

        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "The provided number of users exceed the max limit of 50.");
        assert_eq!(err.args, Value::from(MAX_USERS_PER_REQUEST + 1));
    }

    #[test]
    fn test_add_users_fields_checked_before_cap() {
        let ids: Vec<Value> = (0..=MAX_USERS_PER_REQUEST).map(|i| Value::from(i.to_string())).collect();
        let mut body = Map::new();
        body.insert("users".to_string(), Value::Array(ids));
        body.insert("extra".to_string(), Value::Bool(true));

        let err = parse_add_users_body(body).unwrap_err();

        assert_eq!(err.message, crate::api::types::error::INCORRECT_PARAMETERS);
        assert_eq!(err.args, serde_json::json!(["extra"]));
    }

    #[test]
    fn test_team_response_from_team() {
        let team = Team::new("Platform", "Runs the platform", "admin-id").unwrap();
        let response = TeamResponse::from(&team);

        assert_eq!(response.id, team.id().to_string());
        assert_eq!(response.name, "Platform");
        assert_eq!(response.description, "Runs the platform");
        assert_eq!(response.admin, "admin-id");
        assert_eq!(response.creation_time, team.creation_time().to_rfc3339());
    }
}
