//! Products API routes

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};
use mongodb::Database;

/// Create products router
pub fn router(db: &Database) -> Router {
    let repository = MongoProductRepository::new(db);
    let service = ProductService::new(repository);

    handlers::router(service)
}
