//! MongoDB implementation of CartRepository

use async_trait::async_trait;
use axum_helpers::{DeleteAcknowledgement, InsertAcknowledgement, UpdateAcknowledgement};
use database::mongodb::{codec::json_to_bson, ensure_unique_index, id_filter};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc, oid::ObjectId},
};
use tracing::instrument;

use crate::error::{CartError, CartResult};
use crate::models::{COLLECTION, CartInsert};
use crate::repository::CartRepository;

pub struct MongoCartRepository {
    collection: Collection<Document>,
}

impl MongoCartRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Document>(COLLECTION),
        }
    }

    /// Unique `(name, email)`: one line per item per owner.
    pub async fn init_indexes(&self) -> CartResult<()> {
        ensure_unique_index(
            &self.collection,
            doc! { "name": 1, "email": 1 },
            "idx_name_email_unique",
        )
        .await
        .map_err(CartError::store("creating cart indexes"))
    }

    async fn find_many(&self, filter: Document) -> CartResult<Vec<Document>> {
        let cursor = self
            .collection
            .find(filter)
            .await
            .map_err(CartError::store("fetching cart items"))?;

        cursor
            .try_collect()
            .await
            .map_err(CartError::store("fetching cart items"))
    }
}

#[async_trait]
impl CartRepository for MongoCartRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> CartResult<Vec<Document>> {
        self.find_many(doc! {}).await
    }

    #[instrument(skip(self))]
    async fn list_by_email(&self, email: &str) -> CartResult<Vec<Document>> {
        self.find_many(doc! { "email": email }).await
    }

    #[instrument(skip(self, item), fields(name = %item.name, email = %item.email))]
    async fn create(&self, item: CartInsert) -> CartResult<InsertAcknowledgement> {
        let CartInsert {
            name,
            email,
            document,
        } = item;

        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(CartError::insert(name, email))?;

        tracing::info!(cart_item_id = %result.inserted_id, "Added cart item");
        Ok(result.into())
    }

    #[instrument(skip(self))]
    async fn update_quantity(
        &self,
        id: ObjectId,
        quantity: i64,
    ) -> CartResult<UpdateAcknowledgement> {
        let update = doc! { "$set": { "quantity": json_to_bson(quantity.into()) } };
        let result = self
            .collection
            .update_one(id_filter(id), update)
            .await
            .map_err(CartError::store("updating cart item"))?;

        tracing::info!(cart_item_id = %id, quantity, matched = result.matched_count, "Updated cart quantity");
        Ok(result.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> CartResult<DeleteAcknowledgement> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(CartError::store("deleting cart item"))?;

        tracing::info!(cart_item_id = %id, deleted = result.deleted_count, "Deleted cart item");
        Ok(result.into())
    }
}
