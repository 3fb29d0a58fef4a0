//! MongoDB connector, document codec and provisioning helpers

pub mod codec;
mod config;
mod connector;
mod provision;

pub use codec::{
    InvalidObjectId, bson_to_json, document_to_json, id_filter, is_duplicate_key, json_to_document,
    parse_object_id,
};
pub use config::{DEFAULT_APP_NAME, DEFAULT_DATABASE, DEFAULT_SRV_HOST, MongoConfig};
pub use connector::{
    MongoError, client_options, connect, connect_from_config, connect_from_config_with_retry,
    ping,
};
pub use provision::{ensure_collection, ensure_unique_index};

// Re-export MongoDB types for convenience
pub use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
pub use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
pub use mongodb::{Client, Collection, Database};
