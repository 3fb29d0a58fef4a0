//! Server infrastructure: router assembly, health, store gate, shutdown.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{StoreGate, create_router, health_router};
//! use core_config::{app_info, cors::CorsConfig};
//!
//! let gate = StoreGate::new();
//! let routes = gate.routes(["/products", "/products/{id}"]);
//! let router = create_router::<ApiDoc>(routes, &CorsConfig::permissive())?
//!     .merge(health_router(app_info!()));
//!
//! // later, once the store is connected
//! gate.open(resource_router);
//! ```

pub mod app;
pub mod gate;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use gate::StoreGate;
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
