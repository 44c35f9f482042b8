//! Router-level tests for the auth crate
//!
//! Drive the real router with in-memory storage: registration, login,
//! the bearer guard, and the profile endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::application::session_token::TokenIssuer;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::email::Email;
use crate::infra::memory::InMemoryAccountRepository;
use crate::presentation::router::auth_router_generic;

fn config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::new(b"router-test-secret".to_vec(), Duration::from_secs(3600)).unwrap())
}

fn app(repo: InMemoryAccountRepository, config: Arc<AuthConfig>) -> Router {
    Router::new().nest("/api/users", auth_router_generic(repo, config))
}

fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn register_and_login(app: &Router, email: &str, password: &str) -> String {
    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/api/users/register",
            json!({"email": email, "password": password}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/users/login",
            json!({"email": email, "password": password}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_login_and_protected_access() {
    let repo = InMemoryAccountRepository::new();
    let config = config();
    let app = app(repo.clone(), config.clone());

    // Register
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/users/register",
            json!({"email": "a@x.com", "password": "pw123", "firstName": "Ana"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "a@x.com");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());

    // Wrong password
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/users/login",
            json!({"email": "a@x.com", "password": "wrong"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    // Correct password
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/users/login",
            json!({"email": "a@x.com", "password": "pw123"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["firstName"], "Ana");
    assert!(body["expiresAt"].is_string());
    let token = body["token"].as_str().unwrap().to_string();

    // Protected endpoint with the token
    let bearer = format!("Bearer {token}");
    let (status, body) = send(&app, get_request("/api/users/me", Some(&bearer))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");

    // Same endpoint with an expired token for the same account
    let account = repo
        .find_by_email(&Email::new("a@x.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    let expired = TokenIssuer::new(config)
        .issue_at(&account, Utc::now() - chrono::Duration::hours(2))
        .unwrap();
    let bearer = format!("Bearer {}", expired.token);
    let (status, body) = send(&app, get_request("/api/users/me", Some(&bearer))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_missing_and_malformed_tokens() {
    let app = app(InMemoryAccountRepository::new(), config());

    let (status, body) = send(&app, get_request("/api/users/me", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, _) = send(&app, get_request("/api/users/me", Some("Basic abc"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get_request("/api/users/me", Some("Bearer garbage"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_from_other_secret_is_rejected() {
    let app = app(InMemoryAccountRepository::new(), config());
    let token = register_and_login(&app, "a@x.com", "pw123").await;

    let other = Router::new().nest(
        "/api/users",
        auth_router_generic(InMemoryAccountRepository::new(), Arc::new(AuthConfig::development())),
    );
    let bearer = format!("Bearer {token}");
    let (status, _) = send(&other, get_request("/api/users/me", Some(&bearer))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_registration_is_bad_request() {
    let repo = InMemoryAccountRepository::new();
    let app = app(repo.clone(), config());
    register_and_login(&app, "a@x.com", "pw123").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/users/register",
            json!({"email": "A@X.com", "password": "other"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "An account with this email already exists");
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = app(InMemoryAccountRepository::new(), config());

    for body in [
        json!({"password": "pw123"}),
        json!({"email": "a@x.com"}),
        json!({"email": "not-an-email", "password": "pw123"}),
        json!({"email": "a@x.com", "password": "pw123", "cedula": "12#4"}),
    ] {
        let (status, _) = send(
            &app,
            json_request("POST", "/api/users/register", body.clone(), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }
}

#[tokio::test]
async fn test_profile_update_and_password_change() {
    let app = app(InMemoryAccountRepository::new(), config());
    let token = register_and_login(&app, "a@x.com", "pw123").await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/users/me",
            json!({"firstName": "Ana", "lastName": "Pérez", "cedula": "0102345678"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lastName"], "Pérez");
    assert_eq!(body["nationalId"], "0102345678");

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/users/me/password",
            json!({"currentPassword": "nope", "newPassword": "pw456"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/users/me/password",
            json!({"currentPassword": "pw123", "newPassword": "pw456"}),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/users/login",
            json!({"email": "a@x.com", "password": "pw456"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_account() {
    let repo = InMemoryAccountRepository::new();
    let app = app(repo.clone(), config());
    let admin_token = register_and_login(&app, "admin@x.com", "pw123").await;
    register_and_login(&app, "b@x.com", "pw123").await;

    let target = repo
        .find_by_email(&Email::new("b@x.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    let uri = format!("/api/users/{}", target.account_id);

    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted");
    assert_eq!(repo.len().await, 1);

    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .header(header::AUTHORIZATION, format!("Bearer {admin_token}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
