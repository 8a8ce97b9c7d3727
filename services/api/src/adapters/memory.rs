//! services/api/src/adapters/memory.rs
//!
//! An in-memory `BookingDataSource`, used by the tests and for serving a JSON
//! snapshot of the backend when no live backend is reachable.

use std::path::Path;

use async_trait::async_trait;
use guesthouse_core::domain::{
    Booking, BookingRequest, Customer, Expense, Payment, Room, RoomConfiguration,
};
use guesthouse_core::payments::attach_payments;
use guesthouse_core::ports::{BookingDataSource, PortError, PortResult};
use tracing::info;

use super::records::{
    decode_all, BookingRecord, BookingRequestRecord, CustomerRecord, ExpenseRecord, PaymentRecord,
    RoomConfigurationRecord, RoomRecord, SnapshotRecord,
};
use crate::error::ApiError;

/// Everything the service can read, held in memory.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub rooms: Vec<Room>,
    pub room_configurations: Vec<RoomConfiguration>,
    pub customers: Vec<Customer>,
    pub bookings: Vec<Booking>,
    pub payments: Vec<Payment>,
    pub expenses: Vec<Expense>,
    pub booking_requests: Vec<BookingRequest>,
}

impl Snapshot {
    /// Converts a decoded snapshot document, skipping malformed records.
    ///
    /// Payments nested inside bookings are moved into the flat payment list.
    pub fn from_record(record: SnapshotRecord) -> Self {
        let mut bookings = decode_all("snapshot bookings", record.bookings, BookingRecord::to_domain);
        let mut payments = decode_all("snapshot payments", record.payments, PaymentRecord::to_domain);
        for booking in bookings.iter_mut() {
            for payment in booking.payments.drain(..) {
                if !payments.iter().any(|p| p.id == payment.id) {
                    payments.push(payment);
                }
            }
        }

        Self {
            rooms: decode_all("snapshot rooms", record.rooms, RoomRecord::to_domain),
            room_configurations: decode_all(
                "snapshot room configurations",
                record.room_configurations,
                RoomConfigurationRecord::to_domain,
            ),
            customers: decode_all("snapshot customers", record.customers, CustomerRecord::to_domain),
            bookings,
            payments,
            expenses: decode_all("snapshot expenses", record.expenses, ExpenseRecord::to_domain),
            booking_requests: decode_all(
                "snapshot booking requests",
                record.booking_requests,
                BookingRequestRecord::to_domain,
            ),
        }
    }
}

/// A `BookingDataSource` that answers from a fixed [`Snapshot`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    snapshot: Snapshot,
}

impl InMemoryDataSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Loads a snapshot document (the backend's list payloads under one object).
    pub async fn from_file(path: &Path) -> Result<Self, ApiError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let record: SnapshotRecord = serde_json::from_str(&raw).map_err(|e| {
            ApiError::Internal(format!("Invalid snapshot {}: {}", path.display(), e))
        })?;
        let snapshot = Snapshot::from_record(record);
        info!(
            "Loaded snapshot from {}: {} rooms, {} bookings, {} payments",
            path.display(),
            snapshot.rooms.len(),
            snapshot.bookings.len(),
            snapshot.payments.len()
        );
        Ok(Self::new(snapshot))
    }
}

#[async_trait]
impl BookingDataSource for InMemoryDataSource {
    async fn list_rooms(&self) -> PortResult<Vec<Room>> {
        Ok(self.snapshot.rooms.clone())
    }

    async fn list_room_configurations(&self) -> PortResult<Vec<RoomConfiguration>> {
        Ok(self.snapshot.room_configurations.clone())
    }

    async fn list_customers(&self) -> PortResult<Vec<Customer>> {
        Ok(self.snapshot.customers.clone())
    }

    async fn list_bookings(&self) -> PortResult<Vec<Booking>> {
        let mut bookings = self.snapshot.bookings.clone();
        for booking in bookings.iter_mut() {
            booking.payments.clear();
        }
        Ok(bookings)
    }

    async fn get_booking(&self, booking_id: i64) -> PortResult<Booking> {
        let booking = self
            .snapshot
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Booking {} not found", booking_id)))?;
        let mut bookings = [booking];
        attach_payments(&mut bookings, &self.snapshot.payments);
        let [booking] = bookings;
        Ok(booking)
    }

    async fn list_payments(&self) -> PortResult<Vec<Payment>> {
        Ok(self.snapshot.payments.clone())
    }

    async fn list_payments_for_booking(&self, booking_id: i64) -> PortResult<Vec<Payment>> {
        Ok(self
            .snapshot
            .payments
            .iter()
            .filter(|p| p.booking_id == booking_id)
            .cloned()
            .collect())
    }

    async fn list_expenses(&self) -> PortResult<Vec<Expense>> {
        Ok(self.snapshot.expenses.clone())
    }

    async fn list_booking_requests(&self) -> PortResult<Vec<BookingRequest>> {
        Ok(self.snapshot.booking_requests.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> Snapshot {
        let record: SnapshotRecord = serde_json::from_value(json!({
            "rooms": [{ "id": 1, "roomNumber": "101" }],
            "bookings": [
                {
                    "id": 5, "roomId": 1, "customerPhoneNumber": "9000000001",
                    "checkInDate": "2025-03-01T12:00:00", "checkOutDate": "2025-03-03T11:00:00",
                    "totalAmount": 2000,
                    "payments": [{ "id": 1, "bookingId": 5, "amount": 500 }]
                },
                { "id": 6, "roomId": 1, "customerPhoneNumber": "9000000002", "checkInDate": "never" }
            ],
            "payments": [
                { "id": 1, "bookingId": 5, "amount": 500 },
                { "id": 2, "bookingId": 5, "amount": "250" }
            ]
        }))
        .unwrap();
        Snapshot::from_record(record)
    }

    #[test]
    fn malformed_records_are_dropped_and_payments_deduplicated() {
        let snapshot = snapshot();
        assert_eq!(snapshot.bookings.len(), 1);
        assert_eq!(snapshot.payments.len(), 2);
        assert!(snapshot.bookings[0].payments.is_empty());
    }

    #[test]
    fn a_null_room_id_does_not_empty_the_snapshot() {
        let record: SnapshotRecord = serde_json::from_value(json!({
            "bookings": [
                {
                    "id": 1, "roomId": 1, "customerPhoneNumber": "9000000001",
                    "checkInDate": "2025-03-01T12:00:00", "checkOutDate": "2025-03-03T11:00:00"
                },
                {
                    "id": 2, "roomId": null, "customerPhoneNumber": "9000000002",
                    "checkInDate": "2025-03-01T12:00:00", "checkOutDate": "2025-03-03T11:00:00"
                }
            ],
            "payments": [{ "id": 1, "bookingId": null, "amount": 10 }, { "id": 2, "bookingId": 1, "amount": 20 }]
        }))
        .unwrap();
        let snapshot = Snapshot::from_record(record);
        assert_eq!(snapshot.bookings.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(snapshot.payments.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[tokio::test]
    async fn get_booking_attaches_payments() {
        let source = InMemoryDataSource::new(snapshot());
        let booking = source.get_booking(5).await.unwrap();
        assert_eq!(booking.payments.len(), 2);

        let listed = source.list_bookings().await.unwrap();
        assert!(listed[0].payments.is_empty());

        assert!(matches!(source.get_booking(99).await, Err(PortError::NotFound(_))));
    }
}
