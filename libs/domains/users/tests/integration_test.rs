//! Users against a real MongoDB (needs Docker)

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::{TestDataBuilder, TestMongo};
use tower::ServiceExt;

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn setup(mongo: &TestMongo, builder: &TestDataBuilder) -> Router {
    let db = mongo.database(&builder.database_name());
    let repository = MongoUserRepository::new(&db);
    repository.init_indexes().await.unwrap();
    handlers::router(UserService::new(repository))
}

fn request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_sequential_duplicate_user_is_conflict() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("users_duplicate");
    let app = setup(&mongo, &builder).await;
    let email = builder.email("ada");

    let first = app
        .clone()
        .oneshot(request("POST", "/", json!({ "email": email, "name": "Ada" })))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .clone()
        .oneshot(request("POST", "/", json!({ "email": email, "name": "Imposter" })))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let list = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let users = json_body(list.into_body()).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["name"], "Ada");
}

#[tokio::test]
async fn test_patch_then_get_by_email() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("users_patch");
    let app = setup(&mongo, &builder).await;
    let email = builder.email("grace");

    app.clone()
        .oneshot(request("POST", "/", json!({ "email": email })))
        .await
        .unwrap();

    let patched = app
        .clone()
        .oneshot(request("PATCH", &format!("/{email}"), json!({ "city": "Arlington" })))
        .await
        .unwrap();
    assert_eq!(patched.status(), StatusCode::OK);
    let ack = json_body(patched.into_body()).await;
    assert_eq!(ack["matchedCount"], 1);
    assert_eq!(ack["modifiedCount"], 1);

    let fetched = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/{email}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let user = json_body(fetched.into_body()).await;
    assert_eq!(user["city"], "Arlington");

    let missing = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}", builder.email("nobody")))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::OK);
    assert_eq!(json_body(missing.into_body()).await, Value::Null);
}
