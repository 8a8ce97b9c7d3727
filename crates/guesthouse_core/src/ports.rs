//! crates/guesthouse_core/src/ports.rs
//!
//! Defines the service contracts (traits) at the edge of the core.
//! The REST backend that owns rooms, bookings, payments and customers, and the
//! wall clock, both sit behind these traits so the computations stay pure and
//! testable.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{Booking, BookingRequest, Customer, Expense, Payment, Room, RoomConfiguration};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., HTTP, decoding).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Read-only access to the booking backend. Every call returns a fresh snapshot.
#[async_trait]
pub trait BookingDataSource: Send + Sync {
    // --- Catalog ---
    async fn list_rooms(&self) -> PortResult<Vec<Room>>;

    async fn list_room_configurations(&self) -> PortResult<Vec<RoomConfiguration>>;

    // --- Guests ---
    async fn list_customers(&self) -> PortResult<Vec<Customer>>;

    // --- Bookings and money ---
    /// Bookings come back without payments attached.
    async fn list_bookings(&self) -> PortResult<Vec<Booking>>;

    /// A single booking with its payments attached.
    async fn get_booking(&self, booking_id: i64) -> PortResult<Booking>;

    async fn list_payments(&self) -> PortResult<Vec<Payment>>;

    async fn list_payments_for_booking(&self, booking_id: i64) -> PortResult<Vec<Payment>>;

    async fn list_expenses(&self) -> PortResult<Vec<Expense>>;

    // --- Public booking requests ---
    async fn list_booking_requests(&self) -> PortResult<Vec<BookingRequest>>;
}

/// The single source of "now" for anything that defaults to the current date.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
