mod common;

#[tokio::test]
async fn breakdown_sums_the_bookings_payments() {
    let base = common::spawn().await;
    let (status, body) = common::get_json(&format!("{}/bookings/10/payment-breakdown", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["bookingId"], 10);
    assert_eq!(body["totalAmount"].as_f64(), Some(4500.0));
    assert_eq!(body["totalPaid"].as_f64(), Some(2500.0));
    assert_eq!(body["dueAmount"].as_f64(), Some(2000.0));
    assert_eq!(body["paymentCount"], 2);
    assert_eq!(body["settled"], false);
}

#[tokio::test]
async fn unpaid_and_overpaid_bookings() {
    let base = common::spawn().await;

    let (status, body) = common::get_json(&format!("{}/bookings/11/payment-breakdown", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["totalPaid"].as_f64(), Some(0.0));
    assert_eq!(body["dueAmount"].as_f64(), Some(900.0));
    assert_eq!(body["paymentCount"], 0);

    let (status, body) = common::get_json(&format!("{}/bookings/13/payment-breakdown", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["dueAmount"].as_f64(), Some(-100.0));
    assert_eq!(body["overpaid"], true);
    assert_eq!(body["settled"], true);
}

#[tokio::test]
async fn unknown_booking_is_not_found() {
    let base = common::spawn().await;
    let (status, _) = common::get_text(&format!("{}/bookings/99/payment-breakdown", base)).await;
    assert_eq!(status, 404);
}
