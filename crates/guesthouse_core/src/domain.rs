//! crates/guesthouse_core/src/domain.rs
//!
//! Defines the pure, core data structures for the guest house.
//! These structs are independent of the REST backend and of any serialization format;
//! the API layer converts its wire records into them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;

use crate::numeric::Amount;

//=========================================================================================
// Enumerations
//=========================================================================================

/// Returned when a wire string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    New,
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::New => "NEW",
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::CheckedIn => "CHECKEDIN",
            BookingStatus::CheckedOut => "CHECKEDOUT",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::NoShow => "NO_SHOW",
            BookingStatus::Completed => "COMPLETED",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NEW" => Ok(BookingStatus::New),
            "PENDING" => Ok(BookingStatus::Pending),
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            // The web grid spells the in-house states with an underscore.
            "CHECKEDIN" | "CHECKED_IN" => Ok(BookingStatus::CheckedIn),
            "CHECKEDOUT" | "CHECKED_OUT" => Ok(BookingStatus::CheckedOut),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            "NO_SHOW" => Ok(BookingStatus::NoShow),
            "COMPLETED" => Ok(BookingStatus::Completed),
            _ => Err(UnknownVariant::new("booking status", s)),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing granularity of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationType {
    Daily,
    Monthly,
}

impl DurationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationType::Daily => "DAILY",
            DurationType::Monthly => "MONTHLY",
        }
    }
}

impl FromStr for DurationType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Ok(DurationType::Daily),
            "MONTHLY" => Ok(DurationType::Monthly),
            _ => Err(UnknownVariant::new("duration type", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaymentMode {
    Cash,
    Online,
    CreditCard,
    Caretaker,
    Other(String),
}

impl PaymentMode {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMode::Cash => "CASH",
            PaymentMode::Online => "ONLINE",
            PaymentMode::CreditCard => "CREDIT_CARD",
            PaymentMode::Caretaker => "CARETAKER",
            PaymentMode::Other(other) => other,
        }
    }

    /// Never fails: unrecognised modes are kept verbatim.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "CASH" => PaymentMode::Cash,
            "ONLINE" => PaymentMode::Online,
            "CREDIT_CARD" => PaymentMode::CreditCard,
            "CARETAKER" => PaymentMode::Caretaker,
            "" => PaymentMode::Other("UNKNOWN".to_string()),
            _ => PaymentMode::Other(s.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Other(String),
}

impl PaymentStatus {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => PaymentStatus::Pending,
            "COMPLETED" => PaymentStatus::Completed,
            "FAILED" => PaymentStatus::Failed,
            _ => PaymentStatus::Other(s.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingRequestStatus::Pending => "PENDING",
            BookingRequestStatus::Approved => "APPROVED",
            BookingRequestStatus::Rejected => "REJECTED",
        }
    }
}

impl FromStr for BookingRequestStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(BookingRequestStatus::Pending),
            "APPROVED" => Ok(BookingRequestStatus::Approved),
            "REJECTED" => Ok(BookingRequestStatus::Rejected),
            _ => Err(UnknownVariant::new("booking request status", s)),
        }
    }
}

impl fmt::Display for BookingRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=========================================================================================
// Entities
//=========================================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub room_type: Option<String>,
    pub bathroom_type: Option<String>,
    pub is_available: bool,
}

/// A per-room, per-occupancy price table entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomConfiguration {
    pub id: i64,
    pub room_id: i64,
    pub person_count: u32,
    pub daily_cost: Amount,
    pub monthly_cost: Amount,
    pub is_available: bool,
}

/// A guest. The phone number is the primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub phone_number: String,
    pub name: String,
    pub email: Option<String>,
    pub additional_phone_number: Option<String>,
    pub id_proof_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i64,
    pub booking_id: i64,
    pub amount: Amount,
    pub method: PaymentMode,
    pub status: PaymentStatus,
    pub paid_at: Option<NaiveDateTime>,
}

/// A reservation of a room for a customer. `check_out` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i64,
    pub room_id: i64,
    pub customer_phone_number: String,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub status: BookingStatus,
    pub duration_type: DurationType,
    pub daily_cost: Amount,
    pub monthly_cost: Amount,
    pub early_checkin_cost: Amount,
    pub late_checkout_cost: Amount,
    pub total_amount: Amount,
    pub number_of_people: u32,
    pub created_at: Option<NaiveDateTime>,
    /// Payments attached by the caller; empty when none were fetched.
    pub payments: Vec<Payment>,
}

impl Booking {
    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// Whether the stay covers the start of `day`.
    ///
    /// A day is occupied when its midnight falls inside the half-open stay
    /// `[check_in, check_out)`. An afternoon arrival therefore first occupies the
    /// next day, and a morning departure still occupies its check-out day.
    pub fn occupies(&self, day: NaiveDate) -> bool {
        let midnight = day.and_time(NaiveTime::MIN);
        self.check_in <= midnight && midnight < self.check_out
    }

    /// Whether the half-open stay `[check_in, check_out)` overlaps `[from, to)`.
    pub fn overlaps(&self, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        from < self.check_out && to > self.check_in
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: Amount,
    pub category: String,
    pub expense_date: NaiveDate,
}

/// A booking submitted by a public customer, awaiting staff approval.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub room_id: i64,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub duration_type: DurationType,
    pub daily_cost: Amount,
    pub monthly_cost: Amount,
    pub early_checkin_cost: Amount,
    pub late_checkout_cost: Amount,
    pub number_of_people: u32,
    pub total_amount: Amount,
    pub status: BookingRequestStatus,
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn day(date: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
    }

    fn stay(check_in: NaiveDateTime, check_out: NaiveDateTime) -> Booking {
        Booking {
            id: 1,
            room_id: 1,
            customer_phone_number: "9876543210".to_string(),
            check_in,
            check_out,
            status: BookingStatus::Confirmed,
            duration_type: DurationType::Daily,
            daily_cost: Amount::Missing,
            monthly_cost: Amount::Missing,
            early_checkin_cost: Amount::Missing,
            late_checkout_cost: Amount::Missing,
            total_amount: Amount::Missing,
            number_of_people: 1,
            created_at: None,
            payments: Vec::new(),
        }
    }

    #[test]
    fn status_parsing_accepts_both_spellings() {
        assert_eq!("CHECKEDIN".parse::<BookingStatus>().unwrap(), BookingStatus::CheckedIn);
        assert_eq!("checked_out".parse::<BookingStatus>().unwrap(), BookingStatus::CheckedOut);
        assert!("ARCHIVED".parse::<BookingStatus>().is_err());
        assert_eq!(PaymentMode::parse("credit_card"), PaymentMode::CreditCard);
        assert_eq!(PaymentMode::parse("UPI"), PaymentMode::Other("UPI".to_string()));
    }

    #[test]
    fn occupancy_is_decided_at_midnight() {
        let b = stay(at("2025-01-05", "14:00:00"), at("2025-01-08", "11:00:00"));
        let covered: Vec<bool> = ["2025-01-05", "2025-01-06", "2025-01-07", "2025-01-08", "2025-01-09"]
            .iter()
            .map(|d| b.occupies(day(d)))
            .collect();
        assert_eq!(covered, vec![false, true, true, true, false]);
    }

    #[test]
    fn midnight_boundaries_are_half_open() {
        let b = stay(at("2025-01-05", "00:00:00"), at("2025-01-08", "00:00:00"));
        assert!(b.occupies(day("2025-01-05")));
        assert!(b.occupies(day("2025-01-07")));
        assert!(!b.occupies(day("2025-01-08")));
    }

    #[test]
    fn same_day_stay_covers_no_midnight() {
        let b = stay(at("2025-02-01", "09:00:00"), at("2025-02-01", "18:00:00"));
        assert!(!b.occupies(day("2025-02-01")));
        assert!(!b.occupies(day("2025-02-02")));
    }

    #[test]
    fn overlap_is_half_open() {
        let b = stay(at("2025-03-01", "12:00:00"), at("2025-03-05", "12:00:00"));
        assert!(b.overlaps(at("2025-03-04", "00:00:00"), at("2025-03-06", "00:00:00")));
        assert!(!b.overlaps(at("2025-03-05", "12:00:00"), at("2025-03-07", "12:00:00")));
        assert!(!b.overlaps(at("2025-02-27", "12:00:00"), at("2025-03-01", "12:00:00")));
    }
}
