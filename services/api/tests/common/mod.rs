//! Shared fixtures for the API integration tests: a small guest house, a fixed
//! clock, and a router served on an ephemeral port.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use api_lib::adapters::records::SnapshotRecord;
use api_lib::adapters::{FixedClock, InMemoryDataSource, Snapshot};
use api_lib::config::Config;
use api_lib::web::{build_router, AppState};
use axum::Router;
use chrono::NaiveDateTime;
use serde_json::{json, Value};
use tracing::Level;

/// 2025-06-15 10:00, a Sunday morning at the front desk.
pub fn now() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2025-06-15 10:00", "%Y-%m-%d %H:%M").expect("fixed now")
}

/// The backend's lists, as the backend would send them.
pub fn fixture_json() -> Value {
    json!({
        "rooms": [
            { "id": 1, "roomNumber": "101", "roomType": "DELUXE", "bathroomType": "ATTACHED" },
            { "id": 2, "roomNumber": "102", "roomType": "STANDARD" },
            { "id": 3, "roomNumber": "103" }
        ],
        "roomConfigurations": [
            { "id": 1, "roomId": 1, "personCount": 2, "dailyCost": 1500, "monthlyCost": 30000 },
            { "id": 2, "roomId": 2, "personCount": 1, "dailyCost": "900", "monthlyCost": null }
        ],
        "customers": [
            { "phoneNumber": "+91 98765 43210", "name": "Asha" },
            { "phoneNumber": "9123456789", "name": "Ravi" }
        ],
        "bookings": [
            {
                "id": 10, "roomId": 1, "customerPhoneNumber": "9876543210",
                "checkInDate": "2025-06-14T12:00:00", "checkOutDate": "2025-06-17T11:00:00",
                "bookingStatus": "CHECKEDIN", "bookingDurationType": "DAILY",
                "dailyCost": 1500, "totalAmount": 4500, "numberOfPeople": 2,
                "createdAt": "2025-06-10T08:00:00"
            },
            {
                "id": 11, "roomId": 2, "customerPhoneNumber": "9123456789",
                "checkInDate": "2025-06-15T14:00:00", "checkOutDate": "2025-06-16T11:00:00",
                "bookingStatus": "CONFIRMED", "bookingDurationType": "DAILY",
                "dailyCost": "900", "totalAmount": "900",
                "createdAt": "2025-06-15T09:30:00"
            },
            {
                "id": 12, "roomId": 2, "customerPhoneNumber": "9000000000",
                "checkInDate": "2025-06-20T12:00:00", "checkOutDate": "2025-06-22T11:00:00",
                "bookingStatus": "CANCELLED", "bookingDurationType": "DAILY",
                "dailyCost": 900, "totalAmount": 1800
            },
            {
                "id": 13, "roomId": 9, "customerPhoneNumber": "09123456789",
                "checkInDate": "2025-06-15T12:00:00", "checkOutDate": "2025-06-15T18:00:00",
                "bookingStatus": "PENDING", "bookingDurationType": "DAILY",
                "dailyCost": 500, "totalAmount": 500
            }
        ],
        "payments": [
            { "id": 1, "bookingId": 10, "amount": 2000, "paymentMethod": "CASH",
              "paymentStatus": "COMPLETED", "paymentDate": "2025-06-15T09:00:00" },
            { "id": 2, "bookingId": 10, "amount": "500", "paymentMethod": "ONLINE",
              "paymentStatus": "COMPLETED", "paymentDate": "2025-06-01T18:00:00" },
            { "id": 3, "bookingId": 13, "amount": 600, "paymentMethod": "CARETAKER",
              "paymentStatus": "PENDING", "paymentDate": "2025-05-30T18:00:00" }
        ],
        "expenses": [
            { "id": 1, "description": "Electricity", "amount": 300, "category": "UTILITIES", "expenseDate": "2025-06-15" },
            { "id": 2, "description": "Soap", "amount": "200", "category": "", "expenseDate": "2025-06-02" }
        ],
        "bookingRequests": [
            {
                "id": 1, "customerName": "Meera", "customerPhone": "9988776655", "roomId": 3,
                "checkInDate": "2025-07-01T12:00:00", "checkOutDate": "2025-07-03T11:00:00",
                "bookingDurationType": "DAILY", "dailyCost": 1000, "numberOfPeople": 1,
                "totalAmount": 2000, "status": "PENDING"
            },
            {
                "id": 2, "customerName": "Kiran", "customerPhone": "9988776644", "roomId": 3,
                "checkInDate": "2025-07-05T12:00:00", "checkOutDate": "2025-07-06T11:00:00",
                "bookingDurationType": "DAILY", "dailyCost": 1000, "totalAmount": 1000,
                "status": "APPROVED", "remarks": "Paid advance"
            },
            {
                "id": 3, "customerName": "Dev", "customerPhone": "9988776633", "roomId": 1,
                "checkInDate": "2025-08-01T12:00:00", "checkOutDate": "2025-09-15T11:00:00",
                "bookingDurationType": "MONTHLY", "dailyCost": 1500, "totalAmount": 0,
                "status": "PENDING"
            }
        ]
    })
}

pub fn fixture_snapshot() -> Snapshot {
    let record: SnapshotRecord = serde_json::from_value(fixture_json()).expect("fixture decodes");
    Snapshot::from_record(record)
}

pub fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().expect("socket addr"),
        backend_url: None,
        snapshot_path: None,
        backend_api_token: None,
        backend_timeout: Duration::from_secs(5),
        log_level: Level::INFO,
        grid_days_before: 1,
        grid_days_after: 30,
        cors_allowed_origin: "http://localhost:3000".to_string(),
    }
}

/// Serves the router over `snapshot` on 127.0.0.1 and returns its base URL.
pub async fn spawn_with(snapshot: Snapshot) -> String {
    spawn_configured(snapshot, test_config()).await
}

pub async fn spawn_configured(snapshot: Snapshot, config: Config) -> String {
    let state = Arc::new(AppState {
        source: Arc::new(InMemoryDataSource::new(snapshot)),
        clock: Arc::new(FixedClock(now())),
        config: Arc::new(config),
    });
    serve(build_router(state)).await
}

/// Serves any router on an ephemeral port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}

pub async fn spawn() -> String {
    spawn_with(fixture_snapshot()).await
}

pub async fn get_json(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.expect("request");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

pub async fn get_text(url: &str) -> (u16, String) {
    let response = reqwest::get(url).await.expect("request");
    let status = response.status().as_u16();
    (status, response.text().await.expect("body"))
}
