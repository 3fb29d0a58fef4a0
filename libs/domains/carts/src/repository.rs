use async_trait::async_trait;
use axum_helpers::{DeleteAcknowledgement, InsertAcknowledgement, UpdateAcknowledgement};
use mongodb::bson::{Document, oid::ObjectId};

use crate::error::CartResult;
use crate::models::CartInsert;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn list(&self) -> CartResult<Vec<Document>>;

    /// Items owned by `email`
    async fn list_by_email(&self, email: &str) -> CartResult<Vec<Document>>;

    /// Single insert; a second item with the same `(name, email)` fails with
    /// `DuplicateItem`, even under concurrent requests.
    async fn create(&self, item: CartInsert) -> CartResult<InsertAcknowledgement>;

    async fn update_quantity(
        &self,
        id: ObjectId,
        quantity: i64,
    ) -> CartResult<UpdateAcknowledgement>;

    async fn delete(&self, id: ObjectId) -> CartResult<DeleteAcknowledgement>;
}
