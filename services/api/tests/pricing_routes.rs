mod common;

use serde_json::{json, Value};

async fn post_quote(base: &str, body: Value) -> (u16, String) {
    let response = reqwest::Client::new()
        .post(format!("{}/pricing/quote", base))
        .json(&body)
        .send()
        .await
        .expect("request");
    let status = response.status().as_u16();
    (status, response.text().await.expect("body"))
}

#[tokio::test]
async fn daily_quote_rounds_partial_days_up_and_adds_surcharges() {
    let base = common::spawn().await;
    let (status, body) = post_quote(
        &base,
        json!({
            "durationType": "DAILY",
            "checkIn": "2025-07-01T12:00:00",
            "checkOut": "2025-07-03T13:00:00",
            "dailyCost": "1000",
            "earlyCheckinCost": 200
        }),
    )
    .await;
    assert_eq!(status, 200, "{}", body);
    let quote: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(quote["units"], 3);
    assert_eq!(quote["unitRate"].as_f64(), Some(1000.0));
    assert_eq!(quote["baseCost"].as_f64(), Some(3000.0));
    assert_eq!(quote["surcharges"].as_f64(), Some(200.0));
    assert_eq!(quote["totalCost"].as_f64(), Some(3200.0));
}

#[tokio::test]
async fn rates_are_looked_up_from_the_room_configuration() {
    let base = common::spawn().await;
    let (status, body) = post_quote(
        &base,
        json!({
            "durationType": "MONTHLY",
            "checkIn": "2025-07-01T12:00:00",
            "checkOut": "2025-08-15T12:00:00",
            "roomId": 1,
            "personCount": 2,
            "lateCheckoutCost": "250"
        }),
    )
    .await;
    assert_eq!(status, 200, "{}", body);
    let quote: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(quote["durationType"], "MONTHLY");
    assert_eq!(quote["units"], 2);
    assert_eq!(quote["totalCost"].as_f64(), Some(60250.0));
}

#[tokio::test]
async fn unknown_configuration_is_not_found() {
    let base = common::spawn().await;
    let (status, _) = post_quote(
        &base,
        json!({
            "checkIn": "2025-07-01T12:00:00",
            "checkOut": "2025-07-02T12:00:00",
            "roomId": 3,
            "personCount": 4
        }),
    )
    .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn missing_rate_is_rejected_with_the_form_message() {
    let base = common::spawn().await;
    let (status, body) = post_quote(
        &base,
        json!({
            "durationType": "MONTHLY",
            "checkIn": "2025-07-01T12:00:00",
            "checkOut": "2025-08-01T12:00:00",
            "dailyCost": 1000,
            "monthlyCost": "n/a"
        }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body, "Please enter a valid monthly cost for monthly bookings.");
}

#[tokio::test]
async fn inverted_and_unparsable_dates_are_rejected() {
    let base = common::spawn().await;
    let (status, body) = post_quote(
        &base,
        json!({
            "checkIn": "2025-07-03T12:00:00",
            "checkOut": "2025-07-01T12:00:00",
            "dailyCost": 1000
        }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body, "Check-out must be after check-in.");

    let (status, body) = post_quote(
        &base,
        json!({ "checkIn": "tomorrow", "checkOut": "2025-07-01", "dailyCost": 1000 }),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body.contains("checkIn"), "{}", body);

    let (status, _) = post_quote(
        &base,
        json!({
            "durationType": "WEEKLY",
            "checkIn": "2025-07-01",
            "checkOut": "2025-07-08",
            "dailyCost": 1000
        }),
    )
    .await;
    assert_eq!(status, 400);
}
