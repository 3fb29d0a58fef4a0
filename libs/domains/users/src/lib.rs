//! Users Domain
//!
//! A registry of schemaless user documents identified by `email`. Emails are
//! unique; a second registration with the same email is a conflict.
//!
//! ```rust,no_run
//! use domain_users::{handlers, MongoUserRepository, UserService};
//!
//! # async fn example(db: mongodb::Database) -> Result<(), domain_users::UserError> {
//! let repository = MongoUserRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let router = handlers::router(UserService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{COLLECTION, NewUser, User, UserChanges};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
