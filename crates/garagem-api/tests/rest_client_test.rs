#![allow(clippy::unwrap_used)]
// Integration tests for `RestClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use garagem_api::{Direction, Error, RestClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RestClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = RestClient::with_client(
        reqwest::Client::new(),
        base_url,
        "anon-key".to_string().into(),
    );
    (server, client)
}

#[derive(Debug, serde::Deserialize)]
struct TestRow {
    id: String,
    brand: String,
}

// ── Select tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_select_ordered() {
    let (server, client) = setup().await;

    let body = json!([
        { "id": "2", "brand": "BMW" },
        { "id": "1", "brand": "Fiat" }
    ]);

    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let rows: Vec<TestRow> = client
        .select("vehicles", "created_at", Direction::Descending)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "2");
    assert_eq!(rows[1].brand, "Fiat");
}

#[tokio::test]
async fn test_select_uses_anon_bearer_by_default() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let rows: Vec<TestRow> = client
        .select("vehicles", "created_at", Direction::Descending)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_select_uses_session_bearer_when_set() {
    let (server, client) = setup().await;
    client.set_bearer("user-token".to_string().into());

    Mock::given(method("GET"))
        .and(path("/rest/v1/leads"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let rows: Vec<TestRow> = client
        .select("leads", "date", Direction::Descending)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

// ── Insert tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_insert_returns_created_row() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/vehicles"))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!({ "brand": "Audi" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!([{ "id": "9", "brand": "Audi" }])),
        )
        .mount(&server)
        .await;

    let row: TestRow = client
        .insert("vehicles", &json!({ "brand": "Audi" }))
        .await
        .unwrap();

    assert_eq!(row.id, "9");
    assert_eq!(row.brand, "Audi");
}

#[tokio::test]
async fn test_insert_empty_representation_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/vehicles"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result: Result<TestRow, _> = client.insert("vehicles", &json!({ "brand": "Audi" })).await;

    assert!(
        matches!(result, Err(Error::Api { .. })),
        "expected Api error, got: {result:?}"
    );
}

// ── Update / delete tests ───────────────────────────────────────────

#[tokio::test]
async fn test_update_filters_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/vehicles"))
        .and(query_param("id", "eq.42"))
        .and(body_json(json!({ "price": 35000.0 })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client
        .update("vehicles", "42", &json!({ "price": 35000.0 }))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_filters_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/leads"))
        .and(query_param("id", "eq.7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete("leads", "7").await.unwrap();
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "JWT expired" })))
        .mount(&server)
        .await;

    let result: Result<Vec<TestRow>, _> = client
        .select("vehicles", "created_at", Direction::Descending)
        .await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("JWT expired"), "got: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_structured_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/vehicles"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "violates foreign key constraint",
            "code": "23503"
        })))
        .mount(&server)
        .await;

    let result = client.delete("vehicles", "1").await;

    match result {
        Err(Error::Api {
            ref message,
            ref code,
            status,
        }) => {
            assert!(message.contains("foreign key"), "got: {message}");
            assert_eq!(code.as_deref(), Some("23503"));
            assert_eq!(status, 409);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result: Result<Vec<TestRow>, _> = client
        .select("vehicles", "created_at", Direction::Descending)
        .await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_non_json_error_body_with_multibyte_chars() {
    let (server, client) = setup().await;

    // Proxy error pages are not JSON and not always ASCII; a multi-byte
    // character straddling the preview cutoff must not panic.
    let body = format!("{}é upstream indisponível", "x".repeat(199));
    Mock::given(method("GET"))
        .and(path("/rest/v1/vehicles"))
        .respond_with(ResponseTemplate::new(502).set_body_string(body))
        .mount(&server)
        .await;

    let result: Result<Vec<TestRow>, _> = client
        .select("vehicles", "created_at", Direction::Descending)
        .await;

    match result {
        Err(Error::Api { status, .. }) => assert_eq!(status, 502),
        other => panic!("expected Api error, got: {other:?}"),
    }
}
