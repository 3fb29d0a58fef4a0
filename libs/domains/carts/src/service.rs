//! Cart Service

use std::sync::Arc;
use tracing::instrument;

use axum_helpers::{
    DeleteAcknowledgement, InsertAcknowledgement, UpdateAcknowledgement, json_documents,
};
use mongodb::bson::oid::ObjectId;

use crate::error::CartResult;
use crate::models::{CartItem, NewCartItem, QuantityChange};
use crate::repository::CartRepository;

pub struct CartService<R: CartRepository> {
    repository: Arc<R>,
}

impl<R: CartRepository> CartService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> CartResult<Vec<CartItem>> {
        Ok(json_documents(self.repository.list().await?))
    }

    #[instrument(skip(self))]
    pub async fn list_items_for(&self, email: &str) -> CartResult<Vec<CartItem>> {
        Ok(json_documents(self.repository.list_by_email(email).await?))
    }

    #[instrument(skip(self, input))]
    pub async fn add_item(&self, input: NewCartItem) -> CartResult<InsertAcknowledgement> {
        let insert = input.into_insert()?;
        self.repository.create(insert).await
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        id: ObjectId,
        change: QuantityChange,
    ) -> CartResult<UpdateAcknowledgement> {
        let quantity = change.resolve()?;
        self.repository.update_quantity(id, quantity).await
    }

    /// Deleting an unknown id is not an error; see `deleted_count`.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, id: ObjectId) -> CartResult<DeleteAcknowledgement> {
        self.repository.delete(id).await
    }
}

impl<R: CartRepository> Clone for CartService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CartError;
    use crate::repository::MockCartRepository;
    use mockall::predicate::eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_item_stores_default_quantity() {
        let mut mock_repo = MockCartRepository::new();
        mock_repo
            .expect_create()
            .withf(|item| {
                item.name == "Shoe"
                    && item.email == "a@x.com"
                    && item.document.get_i32("quantity").ok() == Some(1)
            })
            .times(1)
            .returning(|_| Ok(InsertAcknowledgement::new(ObjectId::new().into())));

        let service = CartService::new(mock_repo);
        let input: NewCartItem =
            serde_json::from_value(json!({ "name": "Shoe", "email": "a@x.com" })).unwrap();

        service.add_item(input).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_item_without_name_never_reaches_store() {
        let mut mock_repo = MockCartRepository::new();
        mock_repo.expect_create().never();

        let service = CartService::new(mock_repo);
        let input: NewCartItem = serde_json::from_value(json!({ "email": "a@x.com" })).unwrap();

        assert!(matches!(
            service.add_item(input).await,
            Err(CartError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_patch_resets_quantity() {
        let id = ObjectId::new();
        let mut mock_repo = MockCartRepository::new();
        mock_repo
            .expect_update_quantity()
            .with(eq(id), eq(1))
            .times(1)
            .returning(|_, _| Ok(UpdateAcknowledgement::new(1, 1)));

        let service = CartService::new(mock_repo);
        service
            .update_quantity(id, QuantityChange::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_remove_unknown_item_is_acknowledged() {
        let mut mock_repo = MockCartRepository::new();
        mock_repo
            .expect_delete()
            .returning(|_| Ok(DeleteAcknowledgement::new(0)));

        let service = CartService::new(mock_repo);
        let ack = service.remove_item(ObjectId::new()).await.unwrap();

        assert_eq!(ack.deleted_count, 0);
    }
}
