//! Conversions between client JSON and stored BSON documents.
//!
//! Documents are schemaless. Inbound JSON objects are converted field by field
//! (no extended-JSON interpretation, so a client cannot smuggle in `$oid` or
//! `$date` wrappers). Outbound documents render ObjectIds as 24-character hex
//! strings and dates as RFC 3339, everything else as relaxed extended JSON.

use mongodb::{
    bson::{Bson, Document, doc, oid::ObjectId},
    error::{Error as MongoDriverError, ErrorKind, WriteFailure},
};
use serde_json::{Map, Number, Value};

/// Server error code for unique index violations
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// A path parameter that is not a 24-character hex ObjectId
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid ObjectId")]
pub struct InvalidObjectId(pub String);

/// Parse an externally supplied identifier into the store's native id
pub fn parse_object_id(raw: &str) -> Result<ObjectId, InvalidObjectId> {
    ObjectId::parse_str(raw).map_err(|_| InvalidObjectId(raw.to_string()))
}

/// `{ _id: <id> }`
pub fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// Render a stored document for an HTTP response
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

/// Render a single BSON value for an HTTP response
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::from(dt.timestamp_millis())),
        Bson::Document(inner) => document_to_json(inner),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Convert a client JSON object into a BSON document
pub fn json_to_document(object: Map<String, Value>) -> Document {
    object
        .into_iter()
        .map(|(key, value)| (key, json_to_bson(value)))
        .collect()
}

/// Convert a client JSON value into BSON.
///
/// Integers that fit in 32 bits become `Int32`, larger ones `Int64`, anything
/// else numeric becomes `Double`.
pub fn json_to_bson(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => number_to_bson(&n),
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(json_to_document(map)),
    }
}

fn number_to_bson(n: &Number) -> Bson {
    match n.as_i64() {
        Some(i) => i32::try_from(i).map_or(Bson::Int64(i), Bson::Int32),
        None => Bson::Double(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// Whether a driver error is a unique index violation
pub fn is_duplicate_key(err: &MongoDriverError) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
