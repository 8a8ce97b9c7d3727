//! The REST adapter against a stub booking backend served on an ephemeral port.

mod common;

use std::time::Duration;

use api_lib::adapters::RestBackendAdapter;
use axum::extract::Path;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use guesthouse_core::ports::{BookingDataSource, PortError};
use serde_json::{json, Value};

const TOKEN: &str = "secret";

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", TOKEN);
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) == Some(expected.as_str())
}

fn booking_json(id: i64, room_id: Value) -> Value {
    json!({
        "id": id, "roomId": room_id, "customerPhoneNumber": "9876543210",
        "checkInDate": "2025-06-14T12:00:00", "checkOutDate": "2025-06-17T11:00:00",
        "bookingStatus": "CONFIRMED", "totalAmount": 3000
    })
}

fn stub_backend() -> Router {
    Router::new()
        .route(
            "/api/rooms",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return StatusCode::UNAUTHORIZED.into_response();
                }
                Json(json!([{ "id": 1, "roomNumber": "101" }])).into_response()
            }),
        )
        .route(
            "/api/bookings",
            get(|| async { Json(json!([booking_json(1, json!(1)), booking_json(2, Value::Null)])) }),
        )
        .route(
            "/api/bookings/{id}",
            get(|Path(id): Path<i64>| async move {
                match id {
                    1 | 2 => Json(booking_json(id, json!(1))).into_response(),
                    _ => StatusCode::NOT_FOUND.into_response(),
                }
            }),
        )
        .route(
            "/api/payments/booking/{id}",
            get(|Path(id): Path<i64>| async move {
                match id {
                    2 => Json(json!([{ "id": 7, "bookingId": 2, "amount": 300, "paymentMethod": "CASH" }]))
                        .into_response(),
                    _ => StatusCode::NOT_FOUND.into_response(),
                }
            }),
        )
        .route("/api/expenses", get(|| async { StatusCode::FORBIDDEN }))
        .route("/api/booking-requests", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/api/customer", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }))
}

async fn adapter(token: Option<&str>) -> RestBackendAdapter {
    let base = common::serve(stub_backend()).await;
    RestBackendAdapter::new(
        &format!("{}/api/", base),
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .expect("client builds")
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let rooms = adapter(Some(TOKEN)).await.list_rooms().await.unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].room_number, "101");

    let missing = adapter(None).await.list_rooms().await;
    assert!(matches!(missing, Err(PortError::Unauthorized)));

    let wrong = adapter(Some("stale")).await.list_rooms().await;
    assert!(matches!(wrong, Err(PortError::Unauthorized)));
}

#[tokio::test]
async fn refused_and_failed_lists_map_to_port_errors() {
    let source = adapter(Some(TOKEN)).await;
    assert!(matches!(source.list_expenses().await, Err(PortError::Unauthorized)));
    assert!(matches!(source.list_booking_requests().await, Err(PortError::Unexpected(_))));
    assert!(matches!(source.list_customers().await, Err(PortError::Unexpected(_))));
}

#[tokio::test]
async fn payments_404_means_no_payments() {
    let source = adapter(Some(TOKEN)).await;
    assert!(source.list_payments_for_booking(1).await.unwrap().is_empty());

    let paid = source.list_payments_for_booking(2).await.unwrap();
    assert_eq!(paid.len(), 1);
    assert_eq!(paid[0].amount.value(), 300.0);
}

#[tokio::test]
async fn missing_booking_is_named_in_not_found() {
    let source = adapter(Some(TOKEN)).await;
    match source.get_booking(42).await {
        Err(PortError::NotFound(msg)) => assert_eq!(msg, "Booking 42 not found"),
        other => panic!("expected NotFound, got {:?}", other.map(|b| b.id)),
    }

    let unpaid = source.get_booking(1).await.unwrap();
    assert!(unpaid.payments.is_empty());
    let paid = source.get_booking(2).await.unwrap();
    assert_eq!(paid.payments.len(), 1);
}

#[tokio::test]
async fn a_booking_without_a_room_is_skipped_not_fatal() {
    let bookings = adapter(Some(TOKEN)).await.list_bookings().await.unwrap();
    assert_eq!(bookings.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1]);
}
