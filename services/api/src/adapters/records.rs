//! services/api/src/adapters/records.rs
//!
//! "Impure" wire records for the booking backend's JSON, and their conversion into
//! the core domain types. The backend speaks camelCase and is loose about numbers:
//! amounts may arrive as numbers, strings or nulls.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use guesthouse_core::domain::{
    Booking, BookingRequest, BookingRequestStatus, BookingStatus, Customer, DurationType, Expense,
    Payment, PaymentMode, PaymentStatus, Room, RoomConfiguration,
};
use guesthouse_core::numeric::Amount;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

//=========================================================================================
// Field helpers
//=========================================================================================

/// Keeps a JSON amount exactly as sent; the core decides what it is worth.
pub fn amount_from_json(value: &Value) -> Amount {
    match value {
        Value::Number(n) => n.as_f64().map(Amount::Number).unwrap_or(Amount::Missing),
        Value::String(s) => Amount::Text(s.clone()),
        Value::Null => Amount::Missing,
        other => Amount::Text(other.to_string()),
    }
}

/// Parses the date-time spellings the backend and its clients use.
///
/// Accepts local date-times (`2025-10-15T14:00:00`, optionally with fractional
/// seconds or a space separator), RFC 3339 strings with an offset (the wall-clock
/// time in that offset is kept), and bare dates (midnight).
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    parse_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parses a `YYYY-MM-DD` date, or the date part of a date-time.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| raw.get(..10).and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()))
}

/// Decodes and converts every element of a JSON list on its own, logging and
/// dropping the ones that do not fit `R` or do not convert. One bad record never
/// costs the rest of the list.
pub fn decode_all<R, T>(what: &str, values: Vec<Value>, convert: fn(R) -> Result<T, String>) -> Vec<T>
where
    R: DeserializeOwned,
{
    values
        .into_iter()
        .filter_map(|value| {
            let converted = serde_json::from_value::<R>(value)
                .map_err(|e| e.to_string())
                .and_then(convert);
            match converted {
                Ok(item) => Some(item),
                Err(reason) => {
                    warn!("Skipping malformed record from {}: {}", what, reason);
                    None
                }
            }
        })
        .collect()
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, String> {
    value.ok_or_else(|| format!("missing {}", field))
}

fn required_datetime(field: &str, raw: Option<&str>) -> Result<NaiveDateTime, String> {
    let raw = raw.ok_or_else(|| format!("missing {}", field))?;
    parse_datetime(raw).ok_or_else(|| format!("unparsable {}: {}", field, raw))
}

fn optional_datetime(raw: Option<&str>) -> Option<NaiveDateTime> {
    raw.and_then(parse_datetime)
}

fn people(count: Option<i64>) -> u32 {
    count
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1)
}

//=========================================================================================
// Records
//=========================================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub id: i64,
    pub room_number: Option<String>,
    pub room_type: Option<String>,
    pub bathroom_type: Option<String>,
    pub is_available: Option<bool>,
}

impl RoomRecord {
    pub fn to_domain(self) -> Result<Room, String> {
        Ok(Room {
            id: self.id,
            room_number: self.room_number.unwrap_or_else(|| format!("Room {}", self.id)),
            room_type: self.room_type,
            bathroom_type: self.bathroom_type,
            is_available: self.is_available.unwrap_or(true),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomConfigurationRecord {
    pub id: i64,
    pub room_id: Option<i64>,
    pub person_count: Option<i64>,
    #[serde(default)]
    pub daily_cost: Value,
    #[serde(default)]
    pub monthly_cost: Value,
    pub is_available: Option<bool>,
}

impl RoomConfigurationRecord {
    pub fn to_domain(self) -> Result<RoomConfiguration, String> {
        Ok(RoomConfiguration {
            id: self.id,
            room_id: required("roomId", self.room_id)?,
            person_count: people(self.person_count),
            daily_cost: amount_from_json(&self.daily_cost),
            monthly_cost: amount_from_json(&self.monthly_cost),
            is_available: self.is_available.unwrap_or(true),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub phone_number: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub additional_phone_number: Option<String>,
    #[serde(default)]
    pub id_proof_urls: Option<Vec<String>>,
}

impl CustomerRecord {
    pub fn to_domain(self) -> Result<Customer, String> {
        Ok(Customer {
            phone_number: required("phoneNumber", self.phone_number)?,
            name: self.name.unwrap_or_default(),
            email: self.email,
            additional_phone_number: self.additional_phone_number,
            id_proof_urls: self.id_proof_urls.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: i64,
    pub booking_id: Option<i64>,
    #[serde(default)]
    pub amount: Value,
    #[serde(alias = "mode")]
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
    pub payment_date: Option<String>,
    pub created_at: Option<String>,
}

impl PaymentRecord {
    pub fn to_domain(self) -> Result<Payment, String> {
        Ok(Payment {
            id: self.id,
            booking_id: required("bookingId", self.booking_id)?,
            amount: amount_from_json(&self.amount),
            method: PaymentMode::parse(self.payment_method.as_deref().unwrap_or_default()),
            status: self
                .payment_status
                .as_deref()
                .map(PaymentStatus::parse)
                .unwrap_or(PaymentStatus::Pending),
            paid_at: optional_datetime(self.payment_date.as_deref())
                .or_else(|| optional_datetime(self.created_at.as_deref())),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: i64,
    pub room_id: Option<i64>,
    pub customer_phone_number: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub booking_status: Option<String>,
    pub booking_duration_type: Option<String>,
    #[serde(default)]
    pub daily_cost: Value,
    #[serde(default)]
    pub monthly_cost: Value,
    #[serde(default)]
    pub early_checkin_cost: Value,
    #[serde(default)]
    pub late_checkout_cost: Value,
    #[serde(default)]
    pub total_amount: Value,
    pub number_of_people: Option<i64>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub payments: Option<Vec<Value>>,
}

impl BookingRecord {
    pub fn to_domain(self) -> Result<Booking, String> {
        let room_id = required("roomId", self.room_id)?;
        let customer_phone_number = required("customerPhoneNumber", self.customer_phone_number)?;
        let check_in = required_datetime("checkInDate", self.check_in_date.as_deref())?;
        let check_out = required_datetime("checkOutDate", self.check_out_date.as_deref())?;
        let status = match self.booking_status.as_deref() {
            Some(raw) => raw.parse::<BookingStatus>().map_err(|e| e.to_string())?,
            None => BookingStatus::Confirmed,
        };
        let duration_type = match self.booking_duration_type.as_deref() {
            Some(raw) => raw.parse::<DurationType>().map_err(|e| e.to_string())?,
            None => DurationType::Daily,
        };
        let payments = decode_all(
            "nested booking payments",
            self.payments.unwrap_or_default(),
            PaymentRecord::to_domain,
        );

        Ok(Booking {
            id: self.id,
            room_id,
            customer_phone_number,
            check_in,
            check_out,
            status,
            duration_type,
            daily_cost: amount_from_json(&self.daily_cost),
            monthly_cost: amount_from_json(&self.monthly_cost),
            early_checkin_cost: amount_from_json(&self.early_checkin_cost),
            late_checkout_cost: amount_from_json(&self.late_checkout_cost),
            total_amount: amount_from_json(&self.total_amount),
            number_of_people: people(self.number_of_people),
            created_at: optional_datetime(self.created_at.as_deref()),
            payments,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: i64,
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Value,
    pub category: Option<String>,
    pub expense_date: Option<String>,
}

impl ExpenseRecord {
    pub fn to_domain(self) -> Result<Expense, String> {
        let raw_date = self.expense_date.as_deref().ok_or("missing expenseDate")?;
        let expense_date =
            parse_date(raw_date).ok_or_else(|| format!("unparsable expenseDate: {}", raw_date))?;
        Ok(Expense {
            id: self.id,
            description: self.description.unwrap_or_default(),
            amount: amount_from_json(&self.amount),
            category: self.category.unwrap_or_default(),
            expense_date,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequestRecord {
    pub id: i64,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub room_id: Option<i64>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub booking_duration_type: Option<String>,
    #[serde(default)]
    pub daily_cost: Value,
    #[serde(default)]
    pub monthly_cost: Value,
    #[serde(default)]
    pub early_checkin_cost: Value,
    #[serde(default)]
    pub late_checkout_cost: Value,
    pub number_of_people: Option<i64>,
    #[serde(default)]
    pub total_amount: Value,
    pub status: Option<String>,
    pub remarks: Option<String>,
}

impl BookingRequestRecord {
    pub fn to_domain(self) -> Result<BookingRequest, String> {
        let status = match self.status.as_deref() {
            Some(raw) => raw.parse::<BookingRequestStatus>().map_err(|e| e.to_string())?,
            None => BookingRequestStatus::Pending,
        };
        let duration_type = match self.booking_duration_type.as_deref() {
            Some(raw) => raw.parse::<DurationType>().map_err(|e| e.to_string())?,
            None => DurationType::Daily,
        };
        Ok(BookingRequest {
            id: self.id,
            customer_name: self.customer_name.unwrap_or_default(),
            customer_phone: required("customerPhone", self.customer_phone)?,
            room_id: required("roomId", self.room_id)?,
            check_in: required_datetime("checkInDate", self.check_in_date.as_deref())?,
            check_out: required_datetime("checkOutDate", self.check_out_date.as_deref())?,
            duration_type,
            daily_cost: amount_from_json(&self.daily_cost),
            monthly_cost: amount_from_json(&self.monthly_cost),
            early_checkin_cost: amount_from_json(&self.early_checkin_cost),
            late_checkout_cost: amount_from_json(&self.late_checkout_cost),
            number_of_people: people(self.number_of_people),
            total_amount: amount_from_json(&self.total_amount),
            status,
            remarks: self.remarks,
        })
    }
}

//=========================================================================================
// Snapshot file
//=========================================================================================

/// Every list the service reads, as one JSON document. Missing lists are empty.
///
/// The lists stay raw so that each element is decoded on its own by [`decode_all`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotRecord {
    pub rooms: Vec<Value>,
    pub room_configurations: Vec<Value>,
    pub customers: Vec<Value>,
    pub bookings: Vec<Value>,
    pub payments: Vec<Value>,
    pub expenses: Vec<Value>,
    pub booking_requests: Vec<Value>,
}
