//! Products against a real MongoDB
//!
//! Starts a MongoDB container through testcontainers, so Docker must be running.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::{TestDataBuilder, TestMongo};
use tower::ServiceExt;

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn app(mongo: &TestMongo, test_name: &str) -> Router {
    let builder = TestDataBuilder::from_test_name(test_name);
    let db = mongo.database(&builder.database_name());
    let repository = MongoProductRepository::new(&db);
    repository.init_indexes().await.unwrap();
    handlers::router(ProductService::new(repository))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

#[tokio::test]
async fn test_insert_then_get_round_trip() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo, "products_round_trip").await;

    let (status, ack) = send(
        &app,
        "POST",
        "/",
        Some(json!({ "name": "Trail Runner", "category": "shoes", "price": 89.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = ack["insertedId"].as_str().unwrap().to_string();

    let (status, product) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["_id"], id);
    assert_eq!(product["name"], "Trail Runner");
    assert_eq!(product["price"], 89.5);
}

#[tokio::test]
async fn test_category_and_position_filters() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo, "products_filters").await;

    for body in [
        json!({ "name": "a", "category": "shoes", "position": 1 }),
        json!({ "name": "b", "category": "shoes", "position": "2" }),
        json!({ "name": "c", "category": "hats", "position": 1 }),
    ] {
        send(&app, "POST", "/", Some(body)).await;
    }

    let (_, shoes) = send(&app, "GET", "/?category=shoes", None).await;
    assert_eq!(shoes.as_array().unwrap().len(), 2);

    // Numeric and string forms both match
    let (_, first) = send(&app, "GET", "/?position=1", None).await;
    assert_eq!(first.as_array().unwrap().len(), 2);
    let (_, second) = send(&app, "GET", "/?category=shoes&position=2", None).await;
    assert_eq!(second.as_array().unwrap().len(), 1);

    let (_, all) = send(&app, "GET", "/?category=", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_patch_round_trip() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo, "products_patch").await;

    let (_, ack) = send(&app, "POST", "/", Some(json!({ "name": "Cap", "price": 10 }))).await;
    let id = ack["insertedId"].as_str().unwrap().to_string();

    let (status, outcome) =
        send(&app, "PATCH", &format!("/{id}"), Some(json!({ "price": 12 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["success"], true);

    let (_, product) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(product["price"], 12);
    assert_eq!(product["name"], "Cap");

    // Same value again modifies nothing
    let (status, outcome) =
        send(&app, "PATCH", &format!("/{id}"), Some(json!({ "price": 12 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(outcome["success"], false);
}

#[tokio::test]
async fn test_repeated_delete_is_not_found() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo, "products_delete").await;

    let (_, ack) = send(&app, "POST", "/", Some(json!({ "name": "Scarf" }))).await;
    let id = ack["insertedId"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "DELETE", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (status, _) = send(&app, "DELETE", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
