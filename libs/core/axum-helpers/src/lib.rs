//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog service.
//!
//! ## Modules
//!
//! - **[`errors`]**: error envelope (`AppError` → `{code, error, message, details}`)
//! - **[`extractors`]**: `ObjectIdPath`, `JsonObject`
//! - **[`documents`]**: JSON rendering of stored documents and write acknowledgements
//! - **[`http`]**: CORS and security headers
//! - **[`server`]**: router assembly, health, store gate, graceful shutdown

pub mod documents;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, StoreGate, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{JsonObject, ObjectIdPath};

// Re-export document shapes
pub use documents::{
    DeleteAcknowledgement, InsertAcknowledgement, JsonDocument, UpdateAcknowledgement,
    json_documents,
};
