//! Integration tests for the reservation endpoints.

use std::time::Duration;

use axum::http::StatusCode;
use futures::future::join_all;
use serde_json::json;

use seatguard_core::traits::lock::LockClient;
use seatguard_lock::keys;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_reserve_seat_returns_created() {
    let app = TestApp::new().await;
    let (event_id, seats) = app.seed_event(3).await;

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(json!({ "eventId": event_id.get(), "seatId": seats[0].id.get() })),
            Some(7),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["userId"], 7);
    assert_eq!(data["seatId"], seats[0].id.get());
    assert_eq!(data["status"], "COMPLETE");
    assert_eq!(data["totalPriceCents"], 100_000);
    assert!(data["reservationId"].is_i64());
    assert!(data["message"].is_string());
}

#[tokio::test]
async fn test_reserve_taken_seat_returns_conflict() {
    let app = TestApp::new().await;
    let (event_id, seats) = app.seed_event(1).await;
    let body = json!({ "eventId": event_id.get(), "seatId": seats[0].id.get() });

    let first = app.request("POST", "/api/reservations", Some(body.clone()), Some(1)).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.request("POST", "/api/reservations", Some(body), Some(2)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "CONFLICT");
    assert_eq!(second.body["message"], "seat already taken");
}

#[tokio::test]
async fn test_reserve_missing_seat_returns_not_found() {
    let app = TestApp::new().await;
    let (event_id, _) = app.seed_event(1).await;

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(json!({ "eventId": event_id.get(), "seatId": 9999 })),
            Some(1),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "seat does not exist");
}

#[tokio::test]
async fn test_reserve_locked_seat_returns_busy() {
    let app = TestApp::with_lock_wait(50).await;
    let (event_id, seats) = app.seed_event(1).await;

    let held = app
        .locks
        .acquire(&keys::seat_lock(seats[0].id), Duration::ZERO)
        .await
        .unwrap();

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(json!({ "eventId": event_id.get(), "seatId": seats[0].id.get() })),
            Some(1),
        )
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "BUSY");
    assert_eq!(app.store.reservation_count_for_seat(seats[0].id).await, 0);

    app.locks.release(held).await.unwrap();
}

#[tokio::test]
async fn test_reserve_requires_trusted_identity() {
    let app = TestApp::new().await;
    let (event_id, seats) = app.seed_event(1).await;

    let response = app
        .request(
            "POST",
            "/api/reservations",
            Some(json!({ "eventId": event_id.get(), "seatId": seats[0].id.get() })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.reservation_count_for_seat(seats[0].id).await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_book_seat_once() {
    let app = TestApp::new().await;
    let (event_id, seats) = app.seed_event(1).await;
    let body = json!({ "eventId": event_id.get(), "seatId": seats[0].id.get() });

    let responses = join_all(
        (1..=50).map(|user| app.request("POST", "/api/reservations", Some(body.clone()), Some(user))),
    )
    .await;

    let created = responses
        .iter()
        .filter(|r| r.status == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1);
    assert!(responses.iter().all(|r| matches!(
        r.status,
        StatusCode::CREATED | StatusCode::CONFLICT | StatusCode::SERVICE_UNAVAILABLE
    )));
    assert_eq!(app.store.reservation_count_for_seat(seats[0].id).await, 1);
}

#[tokio::test]
async fn test_get_reservation() {
    let app = TestApp::new().await;
    let (event_id, seats) = app.seed_event(1).await;

    let created = app
        .request(
            "POST",
            "/api/reservations",
            Some(json!({ "eventId": event_id.get(), "seatId": seats[0].id.get() })),
            Some(3),
        )
        .await;
    let id = created.body["data"]["reservationId"].as_i64().unwrap();

    let fetched = app
        .request("GET", &format!("/api/reservations/{id}"), None, Some(3))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["id"], id);
    assert_eq!(fetched.body["data"]["seatId"], seats[0].id.get());

    let missing = app.request("GET", "/api/reservations/424242", None, Some(3)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_reservations_are_private() {
    let app = TestApp::new().await;
    let (event_id, seats) = app.seed_event(2).await;

    for seat in &seats {
        let response = app
            .request(
                "POST",
                "/api/reservations",
                Some(json!({ "eventId": event_id.get(), "seatId": seat.id.get() })),
                Some(11),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let own = app.request("GET", "/api/reservations/user/11", None, Some(11)).await;
    assert_eq!(own.status, StatusCode::OK);
    let listed = own.body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["eventTitle"], "Giselle");

    let other = app.request("GET", "/api/reservations/user/11", None, Some(12)).await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);
}
