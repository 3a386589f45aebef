#![allow(clippy::unwrap_used)]
// Integration tests for `SessionManager` against a mocked auth backend.

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use garagem_api::{AuthClient, RestClient};
use garagem_core::SessionManager;

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SessionManager, Arc<RestClient>) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let http = reqwest::Client::new();
    let auth = Arc::new(AuthClient::with_client(
        http.clone(),
        base_url.clone(),
        "anon-key".to_string().into(),
    ));
    let rest = Arc::new(RestClient::with_client(
        http,
        base_url,
        "anon-key".to_string().into(),
    ));
    let manager = SessionManager::new(auth, Arc::clone(&rest));
    (server, manager, rest)
}

fn session_body(token: &str) -> serde_json::Value {
    json!({
        "access_token": token,
        "refresh_token": "refresh",
        "expires_in": 3600,
        "user": { "id": "u1", "email": "admin@example.com" }
    })
}

// ── Init ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_init_resumes_valid_stored_token() {
    let (server, manager, _rest) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("Authorization", "Bearer stored-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1", "email": "admin@example.com"
        })))
        .mount(&server)
        .await;

    assert!(manager.current().loading);
    manager
        .init(Some(SecretString::from("stored-token".to_owned())))
        .await;

    let state = manager.current();
    assert!(!state.loading);
    assert!(state.is_authenticated());
    assert_eq!(state.user.unwrap().id, "u1");
}

#[tokio::test]
async fn test_init_with_rejected_token_starts_signed_out() {
    let (server, manager, _rest) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "msg": "JWT expired"
        })))
        .mount(&server)
        .await;

    manager
        .init(Some(SecretString::from("expired-token".to_owned())))
        .await;

    let state = manager.current();
    assert!(!state.loading);
    assert!(!state.is_authenticated());
}

#[tokio::test]
async fn test_init_without_stored_token_settles_signed_out() {
    let (_server, manager, _rest) = setup().await;
    manager.init(None).await;
    let state = manager.current();
    assert!(!state.loading);
    assert!(state.user.is_none());
}

// ── Sign-in / sign-out ──────────────────────────────────────────────

#[tokio::test]
async fn test_sign_in_installs_rest_bearer() {
    let (server, manager, rest) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("user-jwt")))
        .mount(&server)
        .await;

    // REST requests must now authenticate as the user, not the anon key.
    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .and(header("Authorization", "Bearer user-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let session = manager
        .sign_in("admin@example.com", &SecretString::from("hunter2".to_owned()))
        .await
        .unwrap();
    assert_eq!(session.user.email.as_deref(), Some("admin@example.com"));
    assert!(manager.current().is_authenticated());

    let rows: Vec<serde_json::Value> = rest
        .select("vehicles", "created_at", garagem_api::Direction::Descending)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_sign_in_failure_surfaces_provider_message() {
    let (server, manager, _rest) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let err = manager
        .sign_in("admin@example.com", &SecretString::from("wrong".to_owned()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid login credentials"));
    assert!(!manager.current().is_authenticated());
}

#[tokio::test]
async fn test_sign_out_drops_session_even_when_server_fails() {
    let (server, manager, _rest) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("user-jwt")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    manager
        .sign_in("admin@example.com", &SecretString::from("hunter2".to_owned()))
        .await
        .unwrap();
    manager.sign_out().await;

    assert!(!manager.current().is_authenticated());
}

#[tokio::test]
async fn test_subscribe_observes_transitions() {
    let (server, manager, _rest) = setup().await;
    let mut rx = manager.subscribe();

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("user-jwt")))
        .mount(&server)
        .await;

    manager.init(None).await;
    rx.changed().await.unwrap();
    assert!(!rx.borrow().loading);

    manager
        .sign_in("admin@example.com", &SecretString::from("hunter2".to_owned()))
        .await
        .unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow().is_authenticated());
}
