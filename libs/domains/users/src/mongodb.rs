//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use axum_helpers::{InsertAcknowledgement, UpdateAcknowledgement};
use database::mongodb::ensure_unique_index;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::COLLECTION;
use crate::repository::UserRepository;

pub struct MongoUserRepository {
    collection: Collection<Document>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Document>(COLLECTION),
        }
    }

    /// Unique index on `email`. Fails if existing data already has duplicates.
    pub async fn init_indexes(&self) -> UserResult<()> {
        ensure_unique_index(&self.collection, doc! { "email": 1 }, "idx_email_unique")
            .await
            .map_err(UserError::store("creating user indexes"))
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> UserResult<Vec<Document>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(UserError::store("fetching users"))?;

        cursor
            .try_collect()
            .await
            .map_err(UserError::store("fetching users"))
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<Document>> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(UserError::store("fetching user"))
    }

    #[instrument(skip(self, document))]
    async fn create(&self, email: &str, document: Document) -> UserResult<InsertAcknowledgement> {
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(UserError::write("adding user", email.to_string()))?;

        tracing::info!(user_id = %result.inserted_id, %email, "Created user");
        Ok(result.into())
    }

    #[instrument(skip(self, changes))]
    async fn update_by_email(
        &self,
        email: &str,
        changes: Document,
    ) -> UserResult<UpdateAcknowledgement> {
        // A changed email can collide with another user
        let new_email = changes
            .get_str("email")
            .map(str::to_string)
            .unwrap_or_else(|_| email.to_string());

        let result = self
            .collection
            .update_one(doc! { "email": email }, doc! { "$set": changes })
            .await
            .map_err(UserError::write("updating user", new_email))?;

        tracing::info!(
            %email,
            matched = result.matched_count,
            modified = result.modified_count,
            "Updated user"
        );
        Ok(result.into())
    }
}
