#![allow(clippy::unwrap_used)]
// Integration tests for the lead capture form's submit lifecycle.

use std::sync::Arc;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use garagem_core::pages::{FormPhase, LeadCaptureForm};
use garagem_core::{CatalogStore, LeadDetails, LeadDraft};

async fn setup() -> (MockServer, CatalogStore) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let rest = garagem_api::RestClient::with_client(
        reqwest::Client::new(),
        base_url,
        "anon-key".to_string().into(),
    );
    (server, CatalogStore::new(Arc::new(rest)))
}

fn sell_draft() -> LeadDraft {
    LeadDraft {
        name: "Carla".into(),
        phone: "47 98888-1111".into(),
        email: "carla@example.com".into(),
        details: LeadDetails::Sell {
            vehicle_brand: "Fiat".into(),
            vehicle_model: "Toro".into(),
            vehicle_year: "2021".into(),
            vehicle_mileage: "45000".into(),
            expected_value: "85000".into(),
            observations: String::new(),
        },
    }
}

#[tokio::test]
async fn test_submit_success_moves_form_to_success() {
    let (server, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/leads"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "l1", "type": "SELL", "name": "Carla",
            "phone": "47 98888-1111", "email": "carla@example.com",
            "date": "2024-05-04T00:00:00Z",
            "vehicle_brand": "Fiat", "vehicle_model": "Toro",
            "vehicle_year": "2021"
        }])))
        .mount(&server)
        .await;

    let mut form = LeadCaptureForm::new();
    assert_eq!(form.phase(), FormPhase::Editing);

    assert!(form.submit(&store, &sell_draft()).await);
    assert_eq!(form.phase(), FormPhase::Success);

    // The UI dismisses the banner after the timeout; the form then
    // accepts a fresh submission.
    form.dismiss();
    assert_eq!(form.phase(), FormPhase::Editing);
}

#[tokio::test]
async fn test_submit_failure_returns_form_to_editing() {
    let (server, store) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/leads"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let mut form = LeadCaptureForm::new();
    assert!(!form.submit(&store, &sell_draft()).await);
    assert_eq!(form.phase(), FormPhase::Editing);

    // A failed submit never flashes the success banner.
    form.dismiss();
    assert_eq!(form.phase(), FormPhase::Editing);
}
