//! API error type rendered inside the response envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use super::envelope::Envelope;
use crate::domain::DomainError;

pub const INCORRECT_PARAMETERS: &str = "Incorrect number of parameters provided.";
pub const INVALID_DETAILS: &str = "Invalid details provided.";
pub const NOT_FOUND: &str = "Requested resource was not found.";
pub const INVALID_JSON: &str = "Invalid JSON body.";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed.";
pub const INTERNAL_ERROR: &str = "Internal server error.";

/// Error body: `{"error": {"args": ...}, "message": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: ErrorArgs,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorArgs {
    pub args: Value,
}

/// API error with status code
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub args: Value,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>, args: Value) -> Self {
        Self {
            status,
            message: message.into(),
            args,
        }
    }

    /// Submitted field names differ from the required ones
    pub fn field_mismatch(difference: Vec<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, INCORRECT_PARAMETERS, json!(difference))
    }

    /// Values that fail validation or uniqueness
    pub fn invalid_details(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_DETAILS, json!([detail.into()]))
    }

    /// Too many ids in a single membership request
    pub fn over_capacity(limit: usize, requested: usize) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            format!("The provided number of users exceed the max limit of {}.", limit),
            json!(requested),
        )
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND, json!([detail.into()]))
    }

    /// Known route, unsupported method
    pub fn method_not_allowed(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED, json!([detail.into()]))
    }

    /// Body that is not a JSON object
    pub fn invalid_json(status: StatusCode, detail: impl Into<String>) -> Self {
        Self::new(status, INVALID_JSON, json!([detail.into()]))
    }

    /// Internal failure; details stay in the logs
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR, json!([]))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Envelope {
            status: self.status,
            body: ErrorBody {
                error: ErrorArgs { args: self.args },
                message: self.message,
            },
        }
        .into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message }
            | DomainError::InvalidId { message }
            | DomainError::Conflict { message } => {
                tracing::warn!(reason = %message, "Rejected request details");
                Self::invalid_details(message)
            }
            DomainError::Capacity { limit, requested } => Self::over_capacity(limit, requested),
            err @ (DomainError::Configuration { .. } | DomainError::Storage { .. }) => {
                tracing::error!(error = %err, "Request failed");
                Self::internal()
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}
