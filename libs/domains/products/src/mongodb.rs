//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use axum_helpers::{DeleteAcknowledgement, InsertAcknowledgement, UpdateAcknowledgement};
use database::mongodb::id_filter;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, oid::ObjectId},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{COLLECTION, ProductFilter};
use crate::repository::ProductRepository;

pub struct MongoProductRepository {
    collection: Collection<Document>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Document>(COLLECTION),
        }
    }

    /// Secondary indexes for the list filters. Not unique.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "position": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_position".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(ProductError::store("creating product indexes"))?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Position arrives as text but may have been stored as a number, so a
    /// numeric-looking value matches either representation.
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(category) = filter.category() {
            doc.insert("category", category);
        }

        if let Some(position) = filter.position() {
            match numeric_position(position) {
                Some(number) => {
                    doc.insert("position", doc! { "$in": [position, number] });
                }
                None => {
                    doc.insert("position", position);
                }
            }
        }

        doc
    }
}

/// Padded input stays a plain string match.
fn numeric_position(raw: &str) -> Option<Bson> {
    if let Ok(int) = raw.parse::<i64>() {
        return Some(match i32::try_from(int) {
            Ok(small) => Bson::Int32(small),
            Err(_) => Bson::Int64(int),
        });
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Bson::Double)
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Document>> {
        let cursor = self
            .collection
            .find(Self::build_filter(&filter))
            .await
            .map_err(ProductError::store("fetching products"))?;

        cursor
            .try_collect()
            .await
            .map_err(ProductError::store("fetching products"))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Document>> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(ProductError::store("fetching product"))
    }

    #[instrument(skip(self, document))]
    async fn create(&self, document: Document) -> ProductResult<InsertAcknowledgement> {
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(ProductError::store("adding product"))?;

        tracing::info!(product_id = %result.inserted_id, "Product created successfully");
        Ok(result.into())
    }

    #[instrument(skip(self, changes))]
    async fn update(
        &self,
        id: ObjectId,
        changes: Document,
    ) -> ProductResult<UpdateAcknowledgement> {
        let result = self
            .collection
            .update_one(id_filter(id), doc! { "$set": changes })
            .await
            .map_err(ProductError::store("updating product"))?;

        tracing::info!(
            product_id = %id,
            matched = result.matched_count,
            modified = result.modified_count,
            "Product update applied"
        );
        Ok(result.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<DeleteAcknowledgement> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(ProductError::store("deleting product"))?;

        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(result.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(category: Option<&str>, position: Option<&str>) -> ProductFilter {
        ProductFilter {
            category: category.map(String::from),
            position: position.map(String::from),
        }
    }

    #[test]
    fn test_build_filter_empty() {
        let doc = MongoProductRepository::build_filter(&ProductFilter::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_skips_empty_values() {
        let doc = MongoProductRepository::build_filter(&filter(Some(""), Some("")));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_category() {
        let doc = MongoProductRepository::build_filter(&filter(Some("shoes"), None));
        assert_eq!(doc, doc! { "category": "shoes" });
    }

    #[test]
    fn test_build_filter_numeric_position_matches_both_forms() {
        let doc = MongoProductRepository::build_filter(&filter(None, Some("3")));
        assert_eq!(doc, doc! { "position": { "$in": ["3", 3] } });
    }

    #[test]
    fn test_build_filter_fractional_position() {
        let doc = MongoProductRepository::build_filter(&filter(None, Some("1.5")));
        assert_eq!(doc, doc! { "position": { "$in": ["1.5", 1.5] } });
    }

    #[test]
    fn test_build_filter_text_position() {
        let doc = MongoProductRepository::build_filter(&filter(Some("hats"), Some("top")));
        assert_eq!(doc, doc! { "category": "hats", "position": "top" });
    }

    #[test]
    fn test_non_finite_position_is_text_only() {
        assert_eq!(numeric_position("NaN"), None);
        assert_eq!(numeric_position("inf"), None);
        assert_eq!(numeric_position("9999999999"), Some(Bson::Int64(9_999_999_999)));
    }

    #[test]
    fn test_padded_position_matches_stored_text_only() {
        assert_eq!(numeric_position(" 3"), None);
        assert_eq!(numeric_position("3 "), None);

        let doc = MongoProductRepository::build_filter(&filter(None, Some(" 3")));
        assert_eq!(doc, doc! { "position": " 3" });
    }
}
