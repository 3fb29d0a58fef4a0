use std::sync::Arc;
use tracing::instrument;

use axum_helpers::{InsertAcknowledgement, UpdateAcknowledgement, json_documents};

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User, UserChanges};
use crate::repository::UserRepository;

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        let documents = self.repository.list().await?;
        Ok(json_documents(documents))
    }

    /// `None` when no user has this email; not an error.
    #[instrument(skip(self))]
    pub async fn get_user(&self, email: &str) -> UserResult<Option<User>> {
        let document = self.repository.get_by_email(email).await?;
        Ok(document.map(User::from))
    }

    /// Register a user. The email must be a non-empty string and unused.
    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: NewUser) -> UserResult<InsertAcknowledgement> {
        let (email, document) = input.into_document()?;
        self.repository.create(&email, document).await
    }

    #[instrument(skip(self, changes))]
    pub async fn update_user(
        &self,
        email: &str,
        changes: UserChanges,
    ) -> UserResult<UpdateAcknowledgement> {
        let changes = changes.into_document().ok_or_else(|| {
            UserError::Validation("Request body must contain at least one field".to_string())
        })?;
        self.repository.update_by_email(email, changes).await
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
