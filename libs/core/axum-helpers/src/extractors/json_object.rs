//! JSON body extractor for schemaless documents.

use crate::errors::{AppError, ErrorCode};
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

/// Request body that must be a JSON object.
///
/// Malformed JSON or a missing `Content-Type: application/json` is rejected the
/// way axum's `Json` does; arrays, strings and other non-object values are
/// rejected with 400 `INVALID_JSON`.
#[derive(Debug)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            _ => Err(
                AppError::BadRequest(ErrorCode::InvalidJson.default_message().to_string())
                    .into_response(),
            ),
        }
    }
}
