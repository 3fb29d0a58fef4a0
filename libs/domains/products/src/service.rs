//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use axum_helpers::{InsertAcknowledgement, json_documents};
use mongodb::bson::oid::ObjectId;

use crate::error::{ProductError, ProductResult};
use crate::models::{DeleteOutcome, NewProduct, PatchOutcome, Product, ProductChanges, ProductFilter};
use crate::repository::ProductRepository;

/// Each operation is a single repository call plus result translation.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let documents = self.repository.list(filter).await?;
        Ok(json_documents(documents))
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .map(Product::from)
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: NewProduct) -> ProductResult<InsertAcknowledgement> {
        self.repository.create(input.into_document()).await
    }

    /// Apply `changes` with `$set`.
    ///
    /// An unknown id and a no-op update are indistinguishable here; both come
    /// back as [`PatchOutcome::unchanged`].
    #[instrument(skip(self, changes))]
    pub async fn update_product(
        &self,
        id: ObjectId,
        changes: ProductChanges,
    ) -> ProductResult<PatchOutcome> {
        let changes = changes.into_document().ok_or_else(|| {
            ProductError::Validation("Request body must contain at least one field".to_string())
        })?;

        let ack = self.repository.update(id, changes).await?;
        Ok(if ack.modified_count == 0 {
            PatchOutcome::unchanged()
        } else {
            PatchOutcome::updated()
        })
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ObjectId) -> ProductResult<DeleteOutcome> {
        let ack = self.repository.delete(id).await?;
        if ack.deleted_count == 0 {
            return Err(ProductError::NotFound(id));
        }
        Ok(DeleteOutcome::deleted())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use axum_helpers::{DeleteAcknowledgement, UpdateAcknowledgement};
    use mockall::predicate::eq;
    use mongodb::bson::doc;
    use serde_json::{Value, json};

    fn object(value: Value) -> serde_json::Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_get_product_renders_document() {
        let id = ObjectId::new();
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(doc! { "_id": id, "name": "Runner" })));

        let service = ProductService::new(mock_repo);
        let product = service.get_product(id).await.unwrap();

        assert_eq!(product.get("_id"), Some(&json!(id.to_hex())));
        assert_eq!(product.get("name"), Some(&json!("Runner")));
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(ObjectId::new()).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_strips_client_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .withf(|document| !document.contains_key("_id") && document.contains_key("name"))
            .returning(|_| Ok(InsertAcknowledgement::new(ObjectId::new().into())));

        let service = ProductService::new(mock_repo);
        let input = NewProduct(object(json!({ "_id": "ignored", "name": "Cap" })));

        assert!(service.create_product(input).await.unwrap().acknowledged);
    }

    #[tokio::test]
    async fn test_update_with_empty_body_skips_store() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .update_product(ObjectId::new(), ProductChanges::default())
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_reports_unchanged_when_nothing_modified() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_update()
            .returning(|_, _| Ok(UpdateAcknowledgement::new(0, 0)));

        let service = ProductService::new(mock_repo);
        let changes = ProductChanges(object(json!({ "price": 10 })));
        let outcome = service
            .update_product(ObjectId::new(), changes)
            .await
            .unwrap();

        assert_eq!(outcome, PatchOutcome::unchanged());
    }

    #[tokio::test]
    async fn test_update_reports_success() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_update()
            .withf(|_, changes| changes == &doc! { "price": 10 })
            .returning(|_, _| Ok(UpdateAcknowledgement::new(1, 1)));

        let service = ProductService::new(mock_repo);
        let changes = ProductChanges(object(json!({ "price": 10 })));
        let outcome = service
            .update_product(ObjectId::new(), changes)
            .await
            .unwrap();

        assert!(outcome.success);
    }

    #[tokio::test]
    async fn test_delete_nothing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .returning(|_| Ok(DeleteAcknowledgement::new(0)));

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(ObjectId::new()).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_passes_store_failure_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_list().returning(|_| {
            Err(ProductError::Database {
                operation: "fetching products",
                message: "connection reset".to_string(),
            })
        });

        let service = ProductService::new(mock_repo);
        let result = service.list_products(ProductFilter::default()).await;

        assert!(matches!(
            result,
            Err(ProductError::Database { operation: "fetching products", .. })
        ));
    }
}
