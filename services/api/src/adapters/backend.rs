//! services/api/src/adapters/backend.rs
//!
//! The REST adapter, the concrete implementation of the `BookingDataSource` port.
//! It reads rooms, bookings, payments and the rest from the booking backend over
//! HTTP using `reqwest`, and converts the loose JSON into domain types.

use std::time::Duration;

use async_trait::async_trait;
use guesthouse_core::domain::{
    Booking, BookingRequest, Customer, Expense, Payment, Room, RoomConfiguration,
};
use guesthouse_core::ports::{BookingDataSource, PortError, PortResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::records::{
    decode_all, BookingRecord, BookingRequestRecord, CustomerRecord, ExpenseRecord, PaymentRecord,
    RoomConfigurationRecord, RoomRecord,
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `BookingDataSource` port against the booking backend.
#[derive(Clone)]
pub struct RestBackendAdapter {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl RestBackendAdapter {
    /// Creates a new `RestBackendAdapter`.
    ///
    /// `base_url` is the API root, e.g. `http://localhost:8082/api/v1`.
    pub fn new(
        base_url: &str,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    /// Fetches `path` and decodes the body as `T`.
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> PortResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PortError::Unexpected(format!("GET {} failed: {}", path, e)))?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| PortError::Unexpected(format!("Malformed body from {}: {}", path, e))),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(PortError::Unauthorized),
            StatusCode::NOT_FOUND => Err(PortError::NotFound(path.to_string())),
            status => Err(PortError::Unexpected(format!(
                "Backend answered {} for {}",
                status, path
            ))),
        }
    }

    /// Fetches a list and converts each record, skipping the ones that do not convert.
    async fn fetch_list<R, T>(&self, path: &str, convert: fn(R) -> Result<T, String>) -> PortResult<Vec<T>>
    where
        R: DeserializeOwned,
    {
        let values: Vec<Value> = self.fetch(path).await?;
        Ok(decode_all(path, values, convert))
    }
}

//=========================================================================================
// `BookingDataSource` Trait Implementation
//=========================================================================================

#[async_trait]
impl BookingDataSource for RestBackendAdapter {
    async fn list_rooms(&self) -> PortResult<Vec<Room>> {
        self.fetch_list("/rooms", RoomRecord::to_domain).await
    }

    async fn list_room_configurations(&self) -> PortResult<Vec<RoomConfiguration>> {
        self.fetch_list("/room-configurations", RoomConfigurationRecord::to_domain)
            .await
    }

    async fn list_customers(&self) -> PortResult<Vec<Customer>> {
        self.fetch_list("/customer", CustomerRecord::to_domain).await
    }

    async fn list_bookings(&self) -> PortResult<Vec<Booking>> {
        let mut bookings = self.fetch_list("/bookings", BookingRecord::to_domain).await?;
        for booking in bookings.iter_mut() {
            booking.payments.clear();
        }
        Ok(bookings)
    }

    async fn get_booking(&self, booking_id: i64) -> PortResult<Booking> {
        let record: BookingRecord = self
            .fetch(&format!("/bookings/{}", booking_id))
            .await
            .map_err(|e| match e {
                PortError::NotFound(_) => {
                    PortError::NotFound(format!("Booking {} not found", booking_id))
                }
                other => other,
            })?;
        let mut booking = record.to_domain().map_err(PortError::Unexpected)?;
        booking.payments = self.list_payments_for_booking(booking_id).await?;
        Ok(booking)
    }

    async fn list_payments(&self) -> PortResult<Vec<Payment>> {
        self.fetch_list("/payments", PaymentRecord::to_domain).await
    }

    async fn list_payments_for_booking(&self, booking_id: i64) -> PortResult<Vec<Payment>> {
        let path = format!("/payments/booking/{}", booking_id);
        match self.fetch_list(&path, PaymentRecord::to_domain).await {
            // The backend answers 404 for a booking nobody has paid against yet.
            Err(PortError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    async fn list_expenses(&self) -> PortResult<Vec<Expense>> {
        self.fetch_list("/expenses", ExpenseRecord::to_domain).await
    }

    async fn list_booking_requests(&self) -> PortResult<Vec<BookingRequest>> {
        self.fetch_list("/booking-requests", BookingRequestRecord::to_domain)
            .await
    }
}
