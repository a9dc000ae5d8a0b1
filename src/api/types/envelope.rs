//! Response envelope shared by every endpoint
//!
//! Each response body has the shape `{"status": <code>, "body": {...}}` and the HTTP
//! status always equals `status`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};

/// `{status, body}` wrapper written as the JSON response
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    pub body: T,
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Empty `error` object carried by successful responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoError {}

/// Successful body: `{"error": {}, ...payload}`
#[derive(Debug, Clone, Serialize)]
pub struct SuccessBody<P> {
    pub error: NoError,
    #[serde(flatten)]
    pub payload: P,
}

/// Envelope of a successful response
pub type ApiResponse<P> = Envelope<SuccessBody<P>>;

impl<P: Serialize> Envelope<SuccessBody<P>> {
    fn success(status: StatusCode, payload: P) -> Self {
        Self {
            status,
            body: SuccessBody {
                error: NoError {},
                payload,
            },
        }
    }

    /// 200 response
    pub fn ok(payload: P) -> Self {
        Self::success(StatusCode::OK, payload)
    }

    /// 201 response
    pub fn created(payload: P) -> Self {
        Self::success(StatusCode::CREATED, payload)
    }
}

/// `{"message": ...}` payload
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    pub message: String,
}

/// `{"id": ...}` payload
#[derive(Debug, Clone, Serialize)]
pub struct IdPayload {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::created(IdPayload {
            id: "abc".to_string(),
        });

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"status": 201, "body": {"error": {}, "id": "abc"}})
        );
    }

    #[test]
    fn test_transport_status_matches_envelope() {
        let response = ApiResponse::ok(MessagePayload {
            message: "up".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
