//! Liveness endpoints

use crate::api::types::{ApiResponse, MessagePayload};

pub const SERVICE_UP_MESSAGE: &str = "Service is up and running.";
pub const HEALTH_CHECK_MESSAGE: &str = "Health check API.";

/// GET /
pub async fn root() -> ApiResponse<MessagePayload> {
    ApiResponse::ok(MessagePayload {
        message: SERVICE_UP_MESSAGE.to_string(),
    })
}

/// GET /api/health
pub async fn health_check() -> ApiResponse<MessagePayload> {
    ApiResponse::ok(MessagePayload {
        message: HEALTH_CHECK_MESSAGE.to_string(),
    })
}
