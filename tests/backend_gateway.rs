//! Testy klienta REST backendu - hydratace, jediný ukládací PUT a chování
//! Circuit Breakeru při výpadku serveru.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use seating_system::config::{BackendConfig, CircuitBreakerConfig};
use seating_system::floorplan::FloorPlan;
use seating_system::models::EventDocument;
use seating_system::services::backend::{BackendError, EventBackendClient};

fn client(base_url: &str, failure_threshold: u32) -> EventBackendClient {
    EventBackendClient::from_config(
        &BackendConfig {
            base_url: base_url.to_string(),
        },
        &CircuitBreakerConfig {
            failure_threshold,
            timeout_seconds: 60,
        },
    )
}

fn sample_event_json() -> serde_json::Value {
    json!({
        "id": 1,
        "date": "2024-06-15",
        "paidCount": 2,
        "freeCount": 1,
        "tables": [
            {
                "id": 1,
                "tableName": "Stůl u krbu",
                "room": "roubenka",
                "capacity": 4,
                "guests": [
                    {"id": 1, "name": "Jana Nováková", "category": "adult", "paid": true}
                ]
            }
        ],
        "guests": [
            {"id": 2, "name": "Petr Novák", "category": "adult", "nationality": "cz", "paid": false}
        ]
    })
}

#[tokio::test]
async fn fetch_event_hydrates_working_copy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_event_json()))
        .mount(&server)
        .await;

    let document = client(&server.uri(), 5).fetch_event(1).await.unwrap();
    let plan = FloorPlan::hydrate(document);

    assert_eq!(plan.event_id, 1);
    assert_eq!(plan.paid_count, 2);
    assert_eq!(plan.guest(1).unwrap().table, Some(1));
    assert_eq!(plan.guest(2).unwrap().table, None);
    assert_eq!(plan.guest(2).unwrap().nationality.as_deref(), Some("cz"));
}

#[tokio::test]
async fn missing_event_maps_to_event_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/7"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server.uri(), 5).fetch_event(7).await.unwrap_err();
    assert!(matches!(err, BackendError::EventNotFound(7)));
}

#[tokio::test]
async fn save_puts_whole_snapshot_to_event_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/events/1"))
        .and(body_partial_json(json!({
            "id": 1,
            "paidCount": 2,
            "tables": [{"id": 1, "tableName": "Stůl u krbu"}]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let document: EventDocument = serde_json::from_value(sample_event_json()).unwrap();
    client(&server.uri(), 5).save_event(&document).await.unwrap();
}

#[tokio::test]
async fn failed_save_surfaces_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let document: EventDocument = serde_json::from_value(sample_event_json()).unwrap();
    let err = client(&server.uri(), 5).save_event(&document).await.unwrap_err();
    assert!(matches!(err, BackendError::Http(_)));
}

#[tokio::test]
async fn circuit_breaker_blocks_after_repeated_failures() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let document: EventDocument = serde_json::from_value(sample_event_json()).unwrap();
    let client = client(&server.uri(), 2);

    for _ in 0..2 {
        let err = client.save_event(&document).await.unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
    }

    // třetí pokus už na síť nejde - obvod je rozpojený
    let err = client.save_event(&document).await.unwrap_err();
    assert!(matches!(err, BackendError::Unavailable));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn fetch_reservations_returns_backend_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reservations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 40,
                "date": "2024-06-15",
                "contactName": "Kovář",
                "status": "paid",
                "persons": [{"type": "adult"}, {"type": "infant", "menu": "dětské"}]
            },
            {
                "id": 41,
                "date": "2024-07-01",
                "contactName": "Svoboda",
                "status": "created"
            }
        ])))
        .mount(&server)
        .await;

    let reservations = client(&server.uri(), 5).fetch_reservations().await.unwrap();
    assert_eq!(reservations.len(), 2);
    assert_eq!(reservations[0].persons.len(), 2);
    assert!(reservations[0].is_paid());
    assert!(reservations[1].persons.is_empty());
}
