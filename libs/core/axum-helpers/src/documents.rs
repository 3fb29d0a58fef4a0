//! JSON shapes for schemaless documents and store acknowledgements.

use database::mongodb::{
    Bson, DeleteResult, Document, InsertOneResult, UpdateResult, bson_to_json, document_to_json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A stored document rendered for clients: ObjectIds as hex strings, dates as
/// RFC 3339, everything else as relaxed extended JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct JsonDocument(pub Map<String, Value>);

impl From<Document> for JsonDocument {
    fn from(document: Document) -> Self {
        match document_to_json(document) {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }
}

impl JsonDocument {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Render a list of stored documents
pub fn json_documents(documents: Vec<Document>) -> Vec<JsonDocument> {
    documents.into_iter().map(JsonDocument::from).collect()
}

/// Result of a single-document insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAcknowledgement {
    pub acknowledged: bool,
    /// Identifier assigned by the store, as a hex string
    #[schema(value_type = String, example = "65f1c0a2b3d4e5f601234567")]
    pub inserted_id: Value,
}

impl InsertAcknowledgement {
    pub fn new(inserted_id: Bson) -> Self {
        Self {
            acknowledged: true,
            inserted_id: bson_to_json(inserted_id),
        }
    }
}

impl From<InsertOneResult> for InsertAcknowledgement {
    fn from(result: InsertOneResult) -> Self {
        Self::new(result.inserted_id)
    }
}

/// Result of a single-document update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAcknowledgement {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<Value>,
}

impl UpdateAcknowledgement {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }
}

impl From<UpdateResult> for UpdateAcknowledgement {
    fn from(result: UpdateResult) -> Self {
        let upserted_id = result.upserted_id.map(bson_to_json);
        Self {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }
}

/// Result of a single-document delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAcknowledgement {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteAcknowledgement {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

impl From<DeleteResult> for DeleteAcknowledgement {
    fn from(result: DeleteResult) -> Self {
        Self::new(result.deleted_count)
    }
}
