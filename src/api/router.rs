//! HTTP router assembly

use axum::{
    http::{Method, Uri},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use serde::Serialize;

use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;
use super::teams;
use super::types::{ApiError, ApiResponse};
use super::users;

/// Every route `create_router` registers, with its methods
pub const SITE_MAP: &[(&str, &[&str])] = &[
    ("/", &["GET"]),
    ("/site-map", &["GET"]),
    ("/api/health", &["GET"]),
    ("/api/teams", &["GET", "POST"]),
    ("/api/teams/{team_id}", &["GET", "PUT"]),
    ("/api/teams/{team_id}/users", &["GET", "POST", "DELETE"]),
    ("/api/users", &["GET", "POST"]),
    ("/api/users/{user_id}", &["GET", "PUT"]),
    ("/api/users/{user_id}/teams", &["GET"]),
];

#[derive(Debug, Clone, Serialize)]
pub struct RouteEntry {
    pub path: &'static str,
    pub methods: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteMapPayload {
    pub routes: Vec<RouteEntry>,
}

/// GET /site-map
async fn site_map() -> ApiResponse<SiteMapPayload> {
    ApiResponse::ok(SiteMapPayload {
        routes: SITE_MAP
            .iter()
            .map(|&(path, methods)| RouteEntry {
                path,
                methods: methods.to_vec(),
            })
            .collect(),
    })
}

/// Routes served under `/api`
fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        // Teams
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/teams/{team_id}", get(teams::get_team).put(teams::update_team))
        .route(
            "/teams/{team_id}/users",
            get(teams::list_team_users)
                .post(teams::add_team_users)
                .delete(teams::remove_team_users),
        )
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{user_id}", get(users::get_user).put(users::update_user))
        .route("/users/{user_id}/teams", get(users::list_user_teams))
}

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/site-map", get(site_map))
        .nest("/api", create_api_router())
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(format!("{} is not supported on {}", method, uri.path()))
}
