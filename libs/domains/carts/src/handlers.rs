//! HTTP handlers for the cart

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use axum_helpers::{
    DeleteAcknowledgement, InsertAcknowledgement, JsonObject, ObjectIdPath, UpdateAcknowledgement,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CartResult;
use crate::models::{CartItem, NewCartItem, QuantityChange};
use crate::repository::CartRepository;
use crate::service::CartService;

#[derive(OpenApi)]
#[openapi(
    paths(list_items, add_item, list_items_for, update_quantity, remove_item),
    components(
        schemas(
            CartItem, NewCartItem, QuantityChange,
            InsertAcknowledgement, UpdateAcknowledgement, DeleteAcknowledgement
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            ConflictResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Carts", description = "Cart items, one per (name, email)")
    )
)]
pub struct ApiDoc;

/// Carts router, mounted under `/carts`.
///
/// `GET /{id}` reads the segment as an owner email; `PATCH` and `DELETE`
/// read it as an item ObjectId.
pub fn router<R: CartRepository + 'static>(service: CartService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(add_item))
        .route(
            "/{id}",
            get(list_items_for)
                .patch(update_quantity)
                .delete(remove_item),
        )
        .with_state(shared_service)
}

#[utoipa::path(
    get,
    path = "",
    tag = "Carts",
    responses(
        (status = 200, description = "Every cart item", body = Vec<CartItem>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_items<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
) -> CartResult<Json<Vec<CartItem>>> {
    Ok(Json(service.list_items().await?))
}

/// Add an item to a cart
#[utoipa::path(
    post,
    path = "",
    tag = "Carts",
    request_body = NewCartItem,
    responses(
        (status = 200, description = "Item added", body = InsertAcknowledgement),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn add_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    JsonObject(body): JsonObject,
) -> CartResult<Json<InsertAcknowledgement>> {
    let ack = service.add_item(NewCartItem(body)).await?;
    Ok(Json(ack))
}

/// Items in one user's cart
#[utoipa::path(
    get,
    path = "/{email}",
    tag = "Carts",
    params(
        ("email" = String, Path, description = "Cart owner email")
    ),
    responses(
        (status = 200, description = "The owner's items, possibly empty", body = Vec<CartItem>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_items_for<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    Path(email): Path<String>,
) -> CartResult<Json<Vec<CartItem>>> {
    Ok(Json(service.list_items_for(&email).await?))
}

/// Set an item's quantity; a missing or falsy quantity sets it to 1
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Carts",
    params(
        ("id" = String, Path, description = "Cart item ObjectId (24 hex characters)")
    ),
    request_body = QuantityChange,
    responses(
        (status = 200, description = "Update acknowledged", body = UpdateAcknowledgement),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_quantity<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    JsonObject(body): JsonObject,
) -> CartResult<Json<UpdateAcknowledgement>> {
    let ack = service
        .update_quantity(id, QuantityChange::from(body))
        .await?;
    Ok(Json(ack))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Carts",
    params(
        ("id" = String, Path, description = "Cart item ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Delete acknowledged", body = DeleteAcknowledgement),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn remove_item<R: CartRepository>(
    State(service): State<Arc<CartService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CartResult<Json<DeleteAcknowledgement>> {
    Ok(Json(service.remove_item(id).await?))
}
