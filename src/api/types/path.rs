//! Path extractor that returns rejections inside the response envelope

use axum::{
    extract::{rejection::PathRejection, FromRequestParts},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use super::error::{ApiError, INVALID_DETAILS};

/// Wrapper around `axum::extract::Path` whose rejections are enveloped `ApiError`s
#[derive(Debug, Clone, Copy, Default)]
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Path(value)),
            Err(rejection) => {
                let err = rejection_to_error(&rejection);
                tracing::warn!(status = %err.status, reason = %rejection.body_text(), "Rejected path");
                Err(err)
            }
        }
    }
}

fn rejection_to_error(rejection: &PathRejection) -> ApiError {
    ApiError::new(
        rejection.status(),
        INVALID_DETAILS,
        serde_json::json!([rejection.body_text()]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn echo(Path(id): Path<String>) -> String {
        id
    }

    fn app() -> Router {
        Router::new().route("/items/{id}", get(echo))
    }

    #[tokio::test]
    async fn test_valid_segment_is_extracted() {
        let response = app()
            .oneshot(Request::get("/items/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_utf8_segment_is_enveloped() {
        let response = app()
            .oneshot(Request::get("/items/%FF").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], 400);
        assert_eq!(json["body"]["message"], INVALID_DETAILS);
    }
}
