use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::mongodb::is_duplicate_key;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("'{name}' is already in the cart of {email}")]
    DuplicateItem { name: String, email: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Error {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

pub type CartResult<T> = Result<T, CartError>;

impl CartError {
    pub(crate) fn store(operation: &'static str) -> impl FnOnce(mongodb::error::Error) -> Self {
        move |err| Self::Database {
            operation,
            message: err.to_string(),
        }
    }

    /// Map a failed insert; the unique `(name, email)` index reports duplicates.
    pub(crate) fn insert(name: String, email: String) -> impl FnOnce(mongodb::error::Error) -> Self {
        move |err| {
            if is_duplicate_key(&err) {
                Self::DuplicateItem { name, email }
            } else {
                Self::store("adding cart item")(err)
            }
        }
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::DuplicateItem { .. } => {
                AppError::Conflict("Item already exists in cart".to_string())
            }
            CartError::Validation(msg) => AppError::Validation(msg),
            CartError::Database { operation, message } => AppError::Database {
                message: format!("Error {operation}"),
                cause: message,
            },
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
