use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};
use mongodb::Database;

pub fn router(db: &Database) -> Router {
    handlers::router(UserService::new(MongoUserRepository::new(db)))
}
