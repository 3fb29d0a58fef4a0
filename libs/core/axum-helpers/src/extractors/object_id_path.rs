//! ObjectId path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use database::mongodb::{ObjectId, parse_object_id};

/// Extractor for a single `{id}` path segment holding a MongoDB ObjectId.
///
/// Anything other than 24 hex characters is rejected with
/// 400 `INVALID_OBJECT_ID`.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_product(ObjectIdPath(id): ObjectIdPath) -> String {
///     id.to_hex()
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        parse_object_id(&raw)
            .map(ObjectIdPath)
            .map_err(|e| AppError::from(e).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/items/{id}",
            get(|ObjectIdPath(id): ObjectIdPath| async move { id.to_hex() }),
        )
    }

    #[tokio::test]
    async fn test_accepts_hex_object_id() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/items/65f1c0a2b3d4e5f601234567")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_malformed_id_with_bad_request() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/items/not-an-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
