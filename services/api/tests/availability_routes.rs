mod common;

use serde_json::Value;

fn room_numbers(body: &Value) -> Vec<String> {
    body["rooms"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["roomNumber"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn confirmed_and_checked_in_stays_block_rooms() {
    let base = common::spawn().await;
    let (status, body) = common::get_json(&format!(
        "{}/rooms/availability?checkIn=2025-06-15T12:00:00&checkOut=2025-06-16T10:00:00",
        base
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(room_numbers(&body), vec!["103"]);
}

#[tokio::test]
async fn cancelled_stays_and_touching_ranges_do_not_block() {
    let base = common::spawn().await;
    let (_, body) = common::get_json(&format!(
        "{}/rooms/availability?checkIn=2025-06-20T12:00:00&checkOut=2025-06-22T11:00:00",
        base
    ))
    .await;
    assert_eq!(room_numbers(&body), vec!["101", "102", "103"]);

    // Booking 10 leaves room 101 at 11:00 on the 17th.
    let (_, body) = common::get_json(&format!(
        "{}/rooms/availability?checkIn=2025-06-17T11:00:00&checkOut=2025-06-18T11:00:00",
        base
    ))
    .await;
    assert!(room_numbers(&body).contains(&"101".to_string()));
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let base = common::spawn().await;
    let (status, _) = common::get_text(&format!(
        "{}/rooms/availability?checkIn=2025-06-16&checkOut=2025-06-15",
        base
    ))
    .await;
    assert_eq!(status, 400);
}
