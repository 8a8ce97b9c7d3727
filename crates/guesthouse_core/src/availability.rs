//! crates/guesthouse_core/src/availability.rs
//!
//! Which rooms can take a new stay over a requested date range.

use chrono::NaiveDateTime;

use crate::domain::{Booking, BookingStatus, Room};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Check-out ({check_out}) must be after check-in ({check_in})")]
    InvalidDateRange {
        check_in: NaiveDateTime,
        check_out: NaiveDateTime,
    },
}

/// Statuses that hold a room. Tentative, cancelled and finished bookings do not.
pub fn blocks_room(status: BookingStatus) -> bool {
    matches!(status, BookingStatus::Confirmed | BookingStatus::CheckedIn)
}

/// Rooms with no blocking booking overlapping `[check_in, check_out)`, in catalog order.
pub fn available_rooms<'a>(
    rooms: &'a [Room],
    bookings: &[Booking],
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
) -> Result<Vec<&'a Room>, AvailabilityError> {
    if check_out <= check_in {
        return Err(AvailabilityError::InvalidDateRange { check_in, check_out });
    }

    Ok(rooms
        .iter()
        .filter(|room| {
            !bookings.iter().any(|b| {
                b.room_id == room.id && blocks_room(b.status) && b.overlaps(check_in, check_out)
            })
        })
        .collect())
}
