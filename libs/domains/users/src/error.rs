use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::mongodb::is_duplicate_key;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Error {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Like [`UserError::store`], but a unique-index violation on `email`
    /// becomes [`UserError::DuplicateEmail`].
    pub(crate) fn write(
        operation: &'static str,
        email: String,
    ) -> impl FnOnce(mongodb::error::Error) -> Self {
        move |err| {
            if is_duplicate_key(&err) {
                Self::DuplicateEmail(email)
            } else {
                Self::store(operation)(err)
            }
        }
    }

    pub(crate) fn store(operation: &'static str) -> impl FnOnce(mongodb::error::Error) -> Self {
        move |err| Self::Database {
            operation,
            message: err.to_string(),
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::DuplicateEmail(email) => {
                tracing::debug!(%email, "Rejected duplicate user");
                AppError::Conflict("User already exists".to_string())
            }
            UserError::Validation(msg) => AppError::Validation(msg),
            UserError::Database { operation, message } => AppError::Database {
                message: format!("Error {operation}"),
                cause: message,
            },
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
