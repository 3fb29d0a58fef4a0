//! API routes module

pub mod carts;
pub mod health;
pub mod products;
pub mod users;

use axum::{Router, routing::get};
use axum_helpers::StoreGate;
use mongodb::Database;

use crate::state::AppState;

/// Every path served by the resource routers
pub const RESOURCE_PATHS: [&str; 6] = [
    "/products",
    "/products/{id}",
    "/users",
    "/users/{email}",
    "/carts",
    "/carts/{id}",
];

/// Routes served from the first moment: liveness, readiness and the gated
/// resource paths.
pub fn routes(state: &AppState, gate: &StoreGate) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(gate.routes(RESOURCE_PATHS))
        .merge(health::router(state.clone()))
}

/// The resource routers, built once the database is reachable
pub fn resource_routes(db: &Database) -> Router {
    Router::new()
        .nest("/products", products::router(db))
        .nest("/users", users::router(db))
        .nest("/carts", carts::router(db))
}

async fn root() -> &'static str {
    "Simple server is running"
}
