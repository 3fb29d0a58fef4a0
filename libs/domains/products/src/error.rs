use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {0} not found")]
    NotFound(ObjectId),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// A store call failed; `operation` reads like "fetching products"
    #[error("Error {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Wrap a driver error for `operation`, for use with `map_err`.
    pub(crate) fn store(operation: &'static str) -> impl FnOnce(mongodb::error::Error) -> Self {
        move |err| Self::Database {
            operation,
            message: err.to_string(),
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::Validation(msg) => AppError::Validation(msg),
            ProductError::Database { operation, message } => AppError::Database {
                message: format!("Error {}", operation),
                cause: message,
            },
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
