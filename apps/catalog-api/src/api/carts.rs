//! Carts API routes

use axum::Router;
use domain_carts::{CartService, MongoCartRepository, handlers};
use mongodb::Database;

pub fn router(db: &Database) -> Router {
    let repository = MongoCartRepository::new(db);
    handlers::router(CartService::new(repository))
}
