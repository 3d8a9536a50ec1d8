//! HTTP-level tests for the users endpoints

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use users_service::api::create_router;
use users_service::api::state::{AppState, UserServiceTrait};
use users_service::create_in_memory_app_state;
use users_service::domain::{DomainError, User};

const STORAGE_DETAIL: &str = "connection refused to db.internal:5432";

/// User service whose backing store is down
struct BrokenStore;

#[async_trait::async_trait]
impl UserServiceTrait for BrokenStore {
    async fn create_from_payload(&self, _payload: Option<&Value>) -> Result<User, DomainError> {
        Err(DomainError::storage(STORAGE_DETAIL))
    }

    async fn get_by_id(&self, _token: &str) -> Result<User, DomainError> {
        Err(DomainError::storage(STORAGE_DETAIL))
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        Err(DomainError::storage(STORAGE_DETAIL))
    }

    fn liveness_check(&self) -> &'static str {
        "pong!"
    }

    async fn readiness_check(&self) -> Result<(), DomainError> {
        Err(DomainError::storage(STORAGE_DETAIL))
    }
}

fn broken_app() -> Router {
    create_router(AppState::new(Arc::new(BrokenStore)))
}

fn app() -> Router {
    create_router(create_in_memory_app_state())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_raw(uri: &str, content_type: Option<&str>, body: &'static str) -> Request<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body)).unwrap()
}

#[tokio::test]
async fn ping_returns_pong() {
    let app = app();

    let (status, body) = send(&app, get("/users/ping")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success", "message": "pong!"}));
}

#[tokio::test]
async fn add_user() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json("/users", &json!({"username": "eder", "email": "eder@eder.org"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "eder@eder.org was added!");
}

#[tokio::test]
async fn add_user_empty_payload() {
    let app = app();

    let (status, body) = send(&app, post_json("/users", &json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": "fail", "message": "Invalid payload."}));
}

#[tokio::test]
async fn add_user_missing_username() {
    let app = app();

    let (status, body) = send(&app, post_json("/users", &json!({"email": "eder@eder.org"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": "fail", "message": "Invalid payload."}));
}

#[tokio::test]
async fn add_user_unreadable_bodies() {
    let app = app();

    let requests = [
        post_raw("/users", Some("application/json"), ""),
        post_raw("/users", Some("application/json"), "{not json"),
        post_raw("/users", Some("application/json"), "null"),
        post_raw("/users", Some("application/json"), "[1, 2]"),
        post_raw("/users", None, r#"{"username":"eder","email":"eder@eder.org"}"#),
    ];

    for request in requests {
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"status": "fail", "message": "Invalid payload."}));
    }
}

#[tokio::test]
async fn add_user_duplicate_email() {
    let app = app();
    let payload = json!({"username": "eder", "email": "eder@eder.org"});

    let (status, _) = send(&app, post_json("/users", &payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, post_json("/users", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"status": "fail", "message": "That email already exists."})
    );
}

#[tokio::test]
async fn add_user_duplicate_username_only() {
    let app = app();

    send(
        &app,
        post_json("/users", &json!({"username": "eder", "email": "eder@eder.org"})),
    )
    .await;

    let (status, body) = send(
        &app,
        post_json("/users", &json!({"username": "eder", "email": "other@eder.org"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"status": "fail", "message": "That username already exists."})
    );
}

#[tokio::test]
async fn single_user() {
    let app = app();

    send(
        &app,
        post_json("/users", &json!({"username": "eder", "email": "eder@eder.org"})),
    )
    .await;

    let (status, body) = send(&app, get("/users/1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["username"], "eder");
    assert_eq!(body["data"]["email"], "eder@eder.org");
}

#[tokio::test]
async fn single_user_malformed_id() {
    let app = app();

    let (status, body) = send(&app, get("/users/happy")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": "fail", "message": "User does not exist"}));
}

#[tokio::test]
async fn single_user_unknown_id() {
    let app = app();

    let (status, body) = send(&app, get("/users/888")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": "fail", "message": "User does not exist"}));
}

#[tokio::test]
async fn all_users() {
    let app = app();

    for (username, email) in [("eder", "eder@eder.org"), ("fletcher", "fletcher@notreal.com")] {
        send(
            &app,
            post_json("/users", &json!({"username": username, "email": email})),
        )
        .await;
    }

    let (status, body) = send(&app, get("/users")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let users = body["data"]["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], "eder");
    assert_eq!(users[1]["email"], "fletcher@notreal.com");
}

#[tokio::test]
async fn probes() {
    let app = app();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = send(&app, get("/live")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"][0]["name"], "user_store");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = app();
    let request = Request::builder()
        .uri("/users/ping")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn eder_scenario() {
    let app = app();
    let payload = json!({"username": "eder", "email": "eder@eder.org"});

    let (status, _) = send(&app, post_json("/users", &payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, post_json("/users", &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "That email already exists.");

    let (status, body) = send(&app, get("/users/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "eder");
    assert_eq!(body["data"]["email"], "eder@eder.org");

    let (status, _) = send(&app, get("/users/happy")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/users/888")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ready_reports_unreachable_store_without_detail() {
    let app = broken_app();

    let (status, body) = send(&app, get("/ready")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"][0]["status"], "unhealthy");
    assert!(!body.to_string().contains(STORAGE_DETAIL));

    let (status, _) = send(&app, get("/live")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn storage_faults_are_internal_errors() {
    let app = broken_app();
    let internal = json!({"status": "fail", "message": "Internal server error."});

    let payload = json!({"username": "eder", "email": "eder@eder.org"});
    let (status, body) = send(&app, post_json("/users", &payload)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, internal);

    let (status, body) = send(&app, get("/users/1")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, internal);

    let (status, body) = send(&app, get("/users")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, internal);
}

#[tokio::test]
async fn add_user_with_nul_character() {
    let app = app();
    let payload = json!({"username": "ed\u{0}er", "email": "eder@eder.org"});

    let (status, body) = send(&app, post_json("/users", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": "fail", "message": "Invalid payload."}));

    let (_, body) = send(&app, get("/users")).await;
    assert_eq!(body["data"]["users"], json!([]));
}
