//! crates/guesthouse_core/src/grid.rs
//!
//! The availability grid: a room × date occupancy matrix built from snapshots of
//! bookings, rooms and customers.
//!
//! The grid is a pure function of its inputs. The date window is always passed in;
//! callers derive the default window from an injected clock via [`GridWindow::around`].

use std::collections::{BTreeSet, HashMap};

use chrono::{Days, NaiveDate};

use crate::directory::CustomerDirectory;
use crate::domain::{Booking, BookingStatus, Customer, Room};

pub const DATE_LABEL_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Grid window ends ({end}) before it starts ({start})")]
    InvertedWindow { start: NaiveDate, end: NaiveDate },
    #[error("Grid window offset is out of range")]
    OutOfRange,
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl GridWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, GridError> {
        if end < start {
            return Err(GridError::InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// `days_before` days before `today` through `days_after` days after it.
    pub fn around(today: NaiveDate, days_before: u32, days_after: u32) -> Result<Self, GridError> {
        let start = today
            .checked_sub_days(Days::new(days_before.into()))
            .ok_or(GridError::OutOfRange)?;
        let end = today
            .checked_add_days(Days::new(days_after.into()))
            .ok_or(GridError::OutOfRange)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Every day of the window, in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start.iter_days().take_while(|d| *d <= self.end).collect()
    }

    pub fn day_count(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridOptions {
    /// Show every catalog room, not only rooms that appear in the bookings.
    pub include_unbooked_rooms: bool,
}

/// A row of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRoom {
    pub room_id: i64,
    pub room_number: String,
    pub room_type: Option<String>,
    /// False when the id was referenced by a booking but missing from the catalog.
    pub in_catalog: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Occupant {
    pub booking_id: i64,
    pub customer_name: String,
    pub phone_number: String,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    Empty,
    Occupied(Occupant),
}

impl GridCell {
    pub fn occupant(&self) -> Option<&Occupant> {
        match self {
            GridCell::Occupied(occupant) => Some(occupant),
            GridCell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, GridCell::Empty)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityGrid {
    pub rooms: Vec<GridRoom>,
    pub dates: Vec<NaiveDate>,
    /// `cells[room_index][date_index]`
    pub cells: Vec<Vec<GridCell>>,
}

impl AvailabilityGrid {
    pub fn cell(&self, room_index: usize, date_index: usize) -> Option<&GridCell> {
        self.cells.get(room_index)?.get(date_index)
    }

    /// Looks a cell up by room id and day.
    pub fn cell_at(&self, room_id: i64, day: NaiveDate) -> Option<&GridCell> {
        let room_index = self.rooms.iter().position(|r| r.room_id == room_id)?;
        let date_index = self.dates.iter().position(|d| *d == day)?;
        self.cell(room_index, date_index)
    }

    pub fn date_labels(&self) -> Vec<String> {
        self.dates
            .iter()
            .map(|d| d.format(DATE_LABEL_FORMAT).to_string())
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }
}

/// Builds the occupancy matrix for `window`.
///
/// Rows are the distinct rooms referenced by `bookings` (plus the whole catalog
/// when `options.include_unbooked_rooms` is set), ordered by room id. A cell holds
/// the first booking, in list order, that is not cancelled and covers the day.
pub fn build_availability_grid(
    bookings: &[Booking],
    rooms: &[Room],
    customers: &[Customer],
    window: GridWindow,
    options: GridOptions,
) -> AvailabilityGrid {
    let catalog: HashMap<i64, &Room> = rooms.iter().map(|r| (r.id, r)).collect();
    let directory = CustomerDirectory::new(customers);

    let mut row_ids: BTreeSet<i64> = bookings.iter().map(|b| b.room_id).collect();
    if options.include_unbooked_rooms {
        row_ids.extend(rooms.iter().map(|r| r.id));
    }

    let grid_rooms: Vec<GridRoom> = row_ids
        .into_iter()
        .map(|room_id| match catalog.get(&room_id) {
            Some(room) => GridRoom {
                room_id,
                room_number: room.room_number.clone(),
                room_type: room.room_type.clone(),
                in_catalog: true,
            },
            None => GridRoom {
                room_id,
                room_number: format!("Room {room_id}"),
                room_type: None,
                in_catalog: false,
            },
        })
        .collect();

    let dates = window.dates();

    let cells = grid_rooms
        .iter()
        .map(|room| {
            let room_bookings: Vec<&Booking> = bookings
                .iter()
                .filter(|b| b.room_id == room.room_id && !b.is_cancelled())
                .collect();

            dates
                .iter()
                .map(|&day| {
                    match room_bookings.iter().find(|b| b.occupies(day)) {
                        Some(booking) => GridCell::Occupied(Occupant {
                            booking_id: booking.id,
                            customer_name: directory.display_name(&booking.customer_phone_number),
                            phone_number: booking.customer_phone_number.clone(),
                            status: booking.status,
                        }),
                        None => GridCell::Empty,
                    }
                })
                .collect()
        })
        .collect();

    AvailabilityGrid {
        rooms: grid_rooms,
        dates,
        cells,
    }
}
