use async_trait::async_trait;
use axum_helpers::{InsertAcknowledgement, UpdateAcknowledgement};
use mongodb::bson::Document;

use crate::error::UserResult;

/// Repository trait for User persistence
///
/// Users are keyed by `email`; uniqueness is enforced by the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> UserResult<Vec<Document>>;

    /// Exact, case-sensitive email match
    async fn get_by_email(&self, email: &str) -> UserResult<Option<Document>>;

    /// Insert a user. Fails with `DuplicateEmail` if `email` is taken.
    async fn create(&self, email: &str, document: Document) -> UserResult<InsertAcknowledgement>;

    /// `$set` fields on the user with `email`
    async fn update_by_email(
        &self,
        email: &str,
        changes: Document,
    ) -> UserResult<UpdateAcknowledgement>;
}
