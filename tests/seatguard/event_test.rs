//! Integration tests for the event catalog endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_listing_reflects_reservations() {
    let app = TestApp::new().await;
    let (event_id, seats) = app.seed_event(5).await;

    let before = app.request("GET", "/api/events", None, None).await;
    assert_eq!(before.status, StatusCode::OK);
    assert_eq!(before.body["data"][0]["availableSeats"], 5);

    let reserved = app
        .request(
            "POST",
            "/api/reservations",
            Some(json!({ "eventId": event_id.get(), "seatId": seats[4].id.get() })),
            Some(1),
        )
        .await;
    assert_eq!(reserved.status, StatusCode::CREATED);

    let after = app.request("GET", "/api/events", None, None).await;
    assert_eq!(after.body["data"][0]["availableSeats"], 4);

    let seat_list = app
        .request("GET", &format!("/api/events/{}/seats", event_id.get()), None, None)
        .await;
    assert_eq!(seat_list.body["data"][4]["isReserved"], true);

    let open = app
        .request(
            "GET",
            &format!("/api/events/{}/seats/available", event_id.get()),
            None,
            None,
        )
        .await;
    assert_eq!(open.body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_seats_of_unknown_event_is_empty() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/events/77/seats", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], json!([]));
}

#[tokio::test]
async fn test_create_event_provisions_seats() {
    let app = TestApp::new().await;

    // Read before the event exists; the cached empty list must not outlive creation.
    let early = app.request("GET", "/api/events/1/seats", None, None).await;
    assert_eq!(early.body["data"], json!([]));

    let created = app
        .request(
            "POST",
            "/api/events",
            Some(json!({
                "title": "Don Quixote",
                "venue": "Opera House",
                "startDate": "2026-12-01",
                "endDate": "2026-12-31",
                "runtimeMinutes": 150,
                "totalSeats": 3
            })),
            None,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["data"]["availableSeats"], 3);
    assert_eq!(created.body["data"]["status"], "ACTIVE");
    let id = created.body["data"]["id"].as_i64().unwrap();
    assert_eq!(id, 1);

    let seats = app
        .request("GET", &format!("/api/events/{id}/seats"), None, None)
        .await;
    let codes: Vec<_> = seats.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["seatCode"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, ["A-1", "A-2", "A-3"]);

    let listing = app.request("GET", "/api/events", None, None).await;
    assert_eq!(listing.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_event_validates_input() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(json!({ "title": "", "venue": "Hall", "totalSeats": 0 })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_event_status() {
    let app = TestApp::new().await;
    let (event_id, _) = app.seed_event(1).await;

    let listed = app.request("GET", "/api/events", None, None).await;
    assert_eq!(listed.body["data"][0]["status"], "ACTIVE");

    let updated = app
        .request(
            "PATCH",
            &format!("/api/events/{}/status?status=CANCELED", event_id.get()),
            None,
            None,
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["status"], "CANCELED");

    let relisted = app.request("GET", "/api/events", None, None).await;
    assert_eq!(relisted.body["data"][0]["status"], "CANCELED");

    let missing = app
        .request("PATCH", "/api/events/999/status?status=ACTIVE", None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let invalid = app
        .request(
            "PATCH",
            &format!("/api/events/{}/status?status=POSTPONED", event_id.get()),
            None,
            None,
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_seat() {
    let app = TestApp::new().await;
    let (_, seats) = app.seed_event(1).await;

    let found = app
        .request("GET", &format!("/api/seats/{}", seats[0].id.get()), None, None)
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["data"]["seatCode"], "A-1");

    let missing = app.request("GET", "/api/seats/555", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
