//! User endpoints

use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::fields::parse_body;
use crate::api::state::AppState;
use crate::api::teams::{TeamResponse, TeamsPayload};
use crate::api::types::{ApiError, ApiResponse, IdPayload, Json, Path};
use crate::domain::user::User;
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

/// Fields accepted when creating or updating a user
pub const USER_FIELDS: [&str; 2] = ["name", "display_name"];

#[derive(Debug, Clone, Deserialize)]
pub struct UserBody {
    pub name: String,
    pub display_name: String,
}

/// User as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub creation_time: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            display_name: user.display_name().to_string(),
            creation_time: user.creation_time().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersPayload {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserInfoPayload {
    pub user_info: UserResponse,
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<ApiResponse<IdPayload>, ApiError> {
    let body: UserBody = parse_body(body, &USER_FIELDS)?;
    debug!(name = %body.name, "Creating user");

    let user = state
        .user_service
        .create(CreateUserRequest {
            name: body.name,
            display_name: body.display_name,
        })
        .await?;

    Ok(ApiResponse::created(IdPayload {
        id: user.id().to_string(),
    }))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiResponse<UsersPayload>, ApiError> {
    let users = state.user_service.list().await?;

    Ok(ApiResponse::ok(UsersPayload {
        users: users.iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<UserInfoPayload>, ApiError> {
    debug!(user_id = %user_id, "Describing user");

    let user = state.user_service.get(&user_id).await?;

    Ok(ApiResponse::ok(UserInfoPayload {
        user_info: UserResponse::from(&user),
    }))
}

/// PUT /api/users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<Map<String, Value>>,
) -> Result<ApiResponse<IdPayload>, ApiError> {
    let body: UserBody = parse_body(body, &USER_FIELDS)?;
    debug!(user_id = %user_id, "Updating user");

    let user = state
        .user_service
        .update(
            &user_id,
            UpdateUserRequest {
                name: body.name,
                display_name: body.display_name,
            },
        )
        .await?;

    Ok(ApiResponse::created(IdPayload {
        id: user.id().to_string(),
    }))
}

/// GET /api/users/{user_id}/teams
pub async fn list_user_teams(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<TeamsPayload>, ApiError> {
    debug!(user_id = %user_id, "Listing user teams");

    let teams = state.user_service.list_teams(&user_id).await?;

    Ok(ApiResponse::ok(TeamsPayload {
        teams: teams.iter().map(TeamResponse::from).collect(),
    }))
}
