use axum_helpers::JsonDocument;
use database::mongodb::json_to_document;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

/// Collection holding the catalog
pub const COLLECTION: &str = "products";

/// A product as returned to clients. Schemaless; `_id` is a hex string.
pub type Product = JsonDocument;

/// Query parameters for listing products.
///
/// Each present, non-empty parameter adds an equality predicate.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Position, matched as a string and also as a number when it parses as one
    pub position: Option<String>,
}

impl ProductFilter {
    pub fn category(&self) -> Option<&str> {
        non_empty(self.category.as_deref())
    }

    pub fn position(&self) -> Option<&str> {
        non_empty(self.position.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Body of `POST /products`: any JSON object, stored as-is.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct NewProduct(pub Map<String, Value>);

impl NewProduct {
    /// The document to insert; a client-supplied `_id` is dropped.
    pub fn into_document(self) -> Document {
        let mut document = json_to_document(self.0);
        document.remove("_id");
        document
    }
}

/// Body of `PATCH /products/{id}`: fields to `$set`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct ProductChanges(pub Map<String, Value>);

impl ProductChanges {
    /// The `$set` payload, or `None` when nothing but `_id` was supplied.
    pub fn into_document(self) -> Option<Document> {
        let mut document = json_to_document(self.0);
        document.remove("_id");
        (!document.is_empty()).then_some(document)
    }
}

/// Outcome of `PATCH /products/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatchOutcome {
    /// `false` when no document was modified
    pub success: bool,
    pub message: String,
}

impl PatchOutcome {
    pub fn updated() -> Self {
        Self {
            success: true,
            message: "Product updated successfully".to_string(),
        }
    }

    pub fn unchanged() -> Self {
        Self {
            success: false,
            message: "Product not found or no changes made".to_string(),
        }
    }
}

/// Outcome of `DELETE /products/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeleteOutcome {
    pub message: String,
}

impl DeleteOutcome {
    pub fn deleted() -> Self {
        Self {
            message: "Product deleted successfully".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_filter_ignores_empty_parameters() {
        let filter = ProductFilter {
            category: Some(String::new()),
            position: Some("2".to_string()),
        };
        assert_eq!(filter.category(), None);
        assert_eq!(filter.position(), Some("2"));
    }

    #[test]
    fn test_new_product_drops_client_id() {
        let product = NewProduct(object(json!({
            "_id": "65f1c0a2b3d4e5f601234567",
            "name": "Runner",
            "category": "shoes"
        })));

        let document = product.into_document();
        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("name").unwrap(), "Runner");
    }

    #[test]
    fn test_changes_with_only_id_are_empty() {
        let changes = ProductChanges(object(json!({ "_id": "x" })));
        assert!(changes.into_document().is_none());
        assert!(ProductChanges::default().into_document().is_none());
    }

    #[test]
    fn test_changes_keep_supplied_fields() {
        let changes = ProductChanges(object(json!({ "price": 12.5, "position": 4 })));
        let document = changes.into_document().unwrap();
        assert_eq!(document.len(), 2);
        assert_eq!(document.get_i32("position").unwrap(), 4);
    }
}
