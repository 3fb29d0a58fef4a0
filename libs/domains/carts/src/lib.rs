//! Carts Domain
//!
//! Cart items live in the `carts` collection. Each item belongs to an owner
//! `email`, has a `name` unique within that owner's cart and an integer
//! `quantity` defaulting to 1.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CartError, CartResult};
pub use handlers::ApiDoc;
pub use models::{
    COLLECTION, CartInsert, CartItem, DEFAULT_QUANTITY, NewCartItem, QuantityChange,
    resolve_quantity,
};
pub use mongodb::MongoCartRepository;
pub use repository::CartRepository;
pub use service::CartService;
