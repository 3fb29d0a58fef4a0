use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use axum_helpers::{
    InsertAcknowledgement, JsonObject, UpdateAcknowledgement,
    errors::responses::{
        BadRequestJsonResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{NewUser, User, UserChanges};
use crate::repository::UserRepository;
use crate::service::UserService;

#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user),
    components(
        schemas(User, NewUser, UserChanges, InsertAcknowledgement, UpdateAcknowledgement),
        responses(
            BadRequestValidationResponse,
            BadRequestJsonResponse,
            ConflictResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Users", description = "User registry keyed by email")
    )
)]
pub struct ApiDoc;

/// Users router, mounted under `/users`
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{email}", get(get_user).patch(update_user))
        .with_state(shared_service)
}

/// List all users
///
/// GET /users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Register a user
///
/// POST /users
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 200, description = "User stored", body = InsertAcknowledgement),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonObject(body): JsonObject,
) -> UserResult<Json<InsertAcknowledgement>> {
    let ack = service.create_user(NewUser(body)).await?;
    Ok(Json(ack))
}

/// Get a user by email; responds with `null` when there is none
///
/// GET /users/{email}
#[utoipa::path(
    get,
    path = "/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "User email, matched exactly")
    ),
    responses(
        (status = 200, description = "The user, or null", body = Option<User>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(email): Path<String>,
) -> UserResult<Json<Option<User>>> {
    let user = service.get_user(&email).await?;
    Ok(Json(user))
}

/// Set fields on the user with this email
///
/// PATCH /users/{email}
#[utoipa::path(
    patch,
    path = "/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "User email, matched exactly")
    ),
    request_body = UserChanges,
    responses(
        (status = 200, description = "Update acknowledged", body = UpdateAcknowledgement),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(email): Path<String>,
    JsonObject(body): JsonObject,
) -> UserResult<Json<UpdateAcknowledgement>> {
    let ack = service.update_user(&email, UserChanges(body)).await?;
    Ok(Json(ack))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use crate::repository::MockUserRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use mongodb::bson::doc;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_returns_all_users() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_list().times(1).returning(|| {
            Ok(vec![
                doc! { "email": "ada@example.com", "name": "Ada" },
                doc! { "email": "alan@example.com" },
            ])
        });

        let response = router(UserService::new(mock_repo))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response.into_body()).await,
            json!([
                { "email": "ada@example.com", "name": "Ada" },
                { "email": "alan@example.com" },
            ])
        );
    }

    #[tokio::test]
    async fn test_list_with_no_users_is_empty_array() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_list().returning(|| Ok(vec![]));

        let response = router(UserService::new(mock_repo))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response.into_body()).await, json!([]));
    }

    #[tokio::test]
    async fn test_get_missing_user_returns_null() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_by_email().returning(|_| Ok(None));

        let response = router(UserService::new(mock_repo))
            .oneshot(
                Request::builder()
                    .uri("/ghost@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response.into_body()).await, Value::Null);
    }

    #[tokio::test]
    async fn test_get_user_decodes_path() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get_by_email()
            .withf(|email| email == "ada+shop@example.com")
            .returning(|email| Ok(Some(doc! { "email": email })));

        let response = router(UserService::new(mock_repo))
            .oneshot(
                Request::builder()
                    .uri("/ada%2Bshop@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["email"], "ada+shop@example.com");
    }

    #[tokio::test]
    async fn test_create_without_email_is_bad_request() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_create().never();

        let response = router(UserService::new(mock_repo))
            .oneshot(post("/", json!({ "name": "Ada" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_duplicate_user_is_conflict() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .returning(|email, _| Err(UserError::DuplicateEmail(email.to_string())));

        let response = router(UserService::new(mock_repo))
            .oneshot(post("/", json!({ "email": "ada@example.com" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "User already exists");
    }

    #[tokio::test]
    async fn test_patch_returns_update_acknowledgement() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_update_by_email()
            .returning(|_, _| Ok(UpdateAcknowledgement::new(0, 0)));

        let response = router(UserService::new(mock_repo))
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/ghost@example.com")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Ghost"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["matchedCount"], 0);
        assert_eq!(body["acknowledged"], true);
    }
}
