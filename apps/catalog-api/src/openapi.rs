//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all resources
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Products, users and carts over MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    nest(
        (path = "/products", api = domain_products::ApiDoc),
        (path = "/users", api = domain_users::ApiDoc),
        (path = "/carts", api = domain_carts::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Users", description = "User registry keyed by email"),
        (name = "Carts", description = "Cart items, one per (name, email)")
    )
)]
pub struct ApiDoc;
