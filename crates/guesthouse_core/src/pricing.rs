//! crates/guesthouse_core/src/pricing.rs
//!
//! The pricing engine: turns a rate card, a duration type and a stay into a total cost.
//!
//! Partial billing units always round up, so a stay of a day and a quarter is
//! billed as two days and a 35-day monthly stay as two months. Early check-in and
//! late check-out surcharges are added for both duration types.

use chrono::NaiveDateTime;

use crate::domain::{BookingRequest, DurationType, RoomConfiguration};
use crate::numeric::Amount;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;
/// Months are billed as fixed 30-day blocks.
const DAYS_PER_BILLING_MONTH: i64 = 30;

/// Reasons a booking form is refused before it reaches the pricing engine.
/// The `Display` text is meant to be shown to staff as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingFormError {
    #[error("Please enter a valid daily cost for daily bookings.")]
    MissingDailyRate,
    #[error("Please enter a valid monthly cost for monthly bookings.")]
    MissingMonthlyRate,
    #[error("Check-out must be after check-in.")]
    InvalidDateRange,
}

/// The daily and monthly rates a booking is priced from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateCard {
    pub daily_cost: Amount,
    pub monthly_cost: Amount,
}

impl RateCard {
    pub fn rate_for(&self, duration_type: DurationType) -> f64 {
        match duration_type {
            DurationType::Daily => self.daily_cost.value(),
            DurationType::Monthly => self.monthly_cost.value(),
        }
    }
}

impl From<&RoomConfiguration> for RateCard {
    fn from(config: &RoomConfiguration) -> Self {
        Self {
            daily_cost: config.daily_cost.clone(),
            monthly_cost: config.monthly_cost.clone(),
        }
    }
}

/// Everything needed to price a new or edited booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub rates: RateCard,
    pub duration_type: DurationType,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub early_checkin_cost: Amount,
    pub late_checkout_cost: Amount,
}

/// A priced booking form.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub duration_type: DurationType,
    pub units: i64,
    pub unit_rate: f64,
    pub base_cost: f64,
    pub surcharges: f64,
    pub total_cost: f64,
}

/// Number of billing units between `check_in` and `check_out`, rounded up.
///
/// Returns 0 when the span is empty or negative.
pub fn billable_units(
    duration_type: DurationType,
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
) -> i64 {
    let seconds = (check_out - check_in).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    let unit = match duration_type {
        DurationType::Daily => SECONDS_PER_DAY,
        DurationType::Monthly => SECONDS_PER_DAY * DAYS_PER_BILLING_MONTH,
    };
    (seconds + unit - 1) / unit
}

/// Computes the total cost of a booking form. Never fails.
///
/// Run [`validate_booking_form`] first; an unvalidated form with a missing rate
/// or an inverted range is priced at its surcharges only.
pub fn calculate_total_cost(form: &BookingForm) -> f64 {
    let units = billable_units(form.duration_type, form.check_in, form.check_out);
    let base = form.rates.rate_for(form.duration_type) * units as f64;
    base + surcharges(form)
}

fn surcharges(form: &BookingForm) -> f64 {
    form.early_checkin_cost.value() + form.late_checkout_cost.value()
}

/// Gatekeeper for [`calculate_total_cost`].
pub fn validate_booking_form(form: &BookingForm) -> Result<(), BookingFormError> {
    if form.check_out <= form.check_in {
        return Err(BookingFormError::InvalidDateRange);
    }
    match form.duration_type {
        DurationType::Daily if !form.rates.daily_cost.is_positive() => {
            Err(BookingFormError::MissingDailyRate)
        }
        DurationType::Monthly if !form.rates.monthly_cost.is_positive() => {
            Err(BookingFormError::MissingMonthlyRate)
        }
        _ => Ok(()),
    }
}

/// Validates then prices a booking form.
pub fn quote(form: &BookingForm) -> Result<Quote, BookingFormError> {
    validate_booking_form(form)?;

    let units = billable_units(form.duration_type, form.check_in, form.check_out);
    let unit_rate = form.rates.rate_for(form.duration_type);
    let base_cost = unit_rate * units as f64;
    let surcharges = surcharges(form);

    Ok(Quote {
        duration_type: form.duration_type,
        units,
        unit_rate,
        base_cost,
        surcharges,
        total_cost: base_cost + surcharges,
    })
}

/// Finds the price table entry for a room at a given occupancy.
/// When duplicates exist the first one in list order wins.
pub fn find_configuration(
    configs: &[RoomConfiguration],
    room_id: i64,
    person_count: u32,
) -> Option<&RoomConfiguration> {
    configs
        .iter()
        .find(|c| c.room_id == room_id && c.person_count == person_count)
}

impl BookingRequest {
    /// The pricing form a staff member would review for this request.
    pub fn booking_form(&self) -> BookingForm {
        BookingForm {
            rates: RateCard {
                daily_cost: self.daily_cost.clone(),
                monthly_cost: self.monthly_cost.clone(),
            },
            duration_type: self.duration_type,
            check_in: self.check_in,
            check_out: self.check_out,
            early_checkin_cost: self.early_checkin_cost.clone(),
            late_checkout_cost: self.late_checkout_cost.clone(),
        }
    }

    pub fn quote(&self) -> Result<Quote, BookingFormError> {
        quote(&self.booking_form())
    }
}
