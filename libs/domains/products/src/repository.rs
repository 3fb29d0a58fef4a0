use async_trait::async_trait;
use axum_helpers::{DeleteAcknowledgement, InsertAcknowledgement, UpdateAcknowledgement};
use mongodb::bson::{Document, oid::ObjectId};

use crate::error::ProductResult;
use crate::models::ProductFilter;

/// Data access for the product catalog.
///
/// Documents are passed through untyped; the only fields the store itself
/// interprets are `_id`, `category` and `position`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Products matching every present filter field, in natural order
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Document>>;

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Document>>;

    /// Insert `document`; the store assigns `_id`
    async fn create(&self, document: Document) -> ProductResult<InsertAcknowledgement>;

    /// `$set` the given fields on the product with `id`
    async fn update(&self, id: ObjectId, changes: Document)
    -> ProductResult<UpdateAcknowledgement>;

    async fn delete(&self, id: ObjectId) -> ProductResult<DeleteAcknowledgement>;
}
