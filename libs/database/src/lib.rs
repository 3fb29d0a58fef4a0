//! Document store plumbing for the catalog service
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, document codec, provisioning
//! - `config` - `core_config::FromEnv` for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::common::RetryConfig;
//! use database::mongodb::{self, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "productDB");
//! let client = mongodb::connect_from_config_with_retry(&config, Some(RetryConfig::new().unlimited())).await?;
//! let db = client.database(config.database());
//! mongodb::ensure_collection(&db, "messages").await?;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry_with_backoff};
