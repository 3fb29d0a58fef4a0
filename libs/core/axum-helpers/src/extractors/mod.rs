//! Custom extractors for Axum handlers.
//!
//! Rejections go through [`AppError`](crate::errors::AppError) so they share
//! the error envelope with every other failure.

pub mod json_object;
pub mod object_id_path;

pub use json_object::JsonObject;
pub use object_id_path::ObjectIdPath;
