//! Custom JSON extractor that returns rejections inside the response envelope

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Wrapper around `axum::Json` whose rejections are enveloped `ApiError`s
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => {
                let err = rejection_to_error(&rejection);
                tracing::warn!(status = %err.status, reason = %rejection.body_text(), "Rejected JSON body");
                Err(err)
            }
        }
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            ApiError::invalid_json(StatusCode::BAD_REQUEST, err.body_text())
        }
        JsonRejection::JsonSyntaxError(err) => {
            ApiError::invalid_json(StatusCode::BAD_REQUEST, err.body_text())
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::invalid_json(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Missing Content-Type header. Expected 'application/json'.",
        ),
        other => ApiError::invalid_json(other.status(), other.body_text()),
    }
}
