//! crates/guesthouse_core/src/dashboard.rs
//!
//! Owner and caretaker dashboards: financial and operational statistics, and the
//! front-desk summary for a single day. Everything is derived from snapshots and
//! an explicitly passed point in time.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::directory::{normalize_phone, CustomerDirectory};
use crate::domain::{
    Booking, BookingStatus, Customer, DurationType, Expense, Payment, PaymentStatus, Room,
};
use crate::numeric::sum_amounts;
use crate::payments::calculate_payment_breakdown;
use crate::pricing::billable_units;

const UNKNOWN_CUSTOMER: &str = "Unknown Customer";
const OTHER_CATEGORY: &str = "OTHER";

/// The snapshots a dashboard is computed from.
#[derive(Debug, Clone, Copy)]
pub struct DashboardInput<'a> {
    pub rooms: &'a [Room],
    pub customers: &'a [Customer],
    pub bookings: &'a [Booking],
    pub payments: &'a [Payment],
    pub expenses: &'a [Expense],
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub today_revenue: f64,
    pub this_month_revenue: f64,
    pub today_expenses: f64,
    pub this_month_expenses: f64,
    pub net_profit_today: f64,
    pub net_profit_this_month: f64,

    pub bookings_created_today: usize,
    pub bookings_created_this_month: usize,
    pub total_bookings: usize,
    pub confirmed_bookings: usize,
    pub pending_bookings: usize,
    pub checked_out_bookings: usize,
    pub avg_booking_value: f64,
    pub avg_stay_days: f64,
    pub payment_collection_rate: f64,

    pub total_customers: usize,
    pub customers_with_bookings: usize,
    pub customer_retention_rate: f64,

    /// Most booked room and its booking count. Ties go to the lower room id.
    pub top_room: Option<(i64, usize)>,
    pub payment_methods: BTreeMap<String, usize>,
    pub expense_categories: BTreeMap<String, f64>,

    pub booking_conversion_rate: f64,
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn average(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Computes the owner statistics as of `now`.
///
/// "Today" and "this month" are the calendar day and month of `now`. Payments
/// without a payment date are counted in totals but in neither period.
pub fn compute_stats(input: &DashboardInput<'_>, now: NaiveDateTime) -> DashboardStats {
    let today = now.date();

    let today_payments: Vec<&Payment> = input
        .payments
        .iter()
        .filter(|p| p.paid_at.is_some_and(|at| at.date() == today))
        .collect();
    let month_payments: Vec<&Payment> = input
        .payments
        .iter()
        .filter(|p| p.paid_at.is_some_and(|at| same_month(at.date(), today)))
        .collect();

    let today_revenue = sum_amounts(today_payments.iter().map(|p| &p.amount));
    let this_month_revenue = sum_amounts(month_payments.iter().map(|p| &p.amount));
    let today_expenses = sum_amounts(
        input
            .expenses
            .iter()
            .filter(|e| e.expense_date == today)
            .map(|e| &e.amount),
    );
    let this_month_expenses = sum_amounts(
        input
            .expenses
            .iter()
            .filter(|e| same_month(e.expense_date, today))
            .map(|e| &e.amount),
    );

    let bookings = input.bookings;
    let total_bookings = bookings.len();
    let count_status = |pred: fn(BookingStatus) -> bool| bookings.iter().filter(|b| pred(b.status)).count();
    let confirmed_bookings = count_status(|s| matches!(s, BookingStatus::Confirmed | BookingStatus::CheckedIn));
    let pending_bookings = count_status(|s| s == BookingStatus::Pending);
    let checked_out_bookings = count_status(|s| s == BookingStatus::CheckedOut);

    let bookings_created_today = bookings
        .iter()
        .filter(|b| b.created_at.is_some_and(|at| at.date() == today))
        .count();
    let bookings_created_this_month = bookings
        .iter()
        .filter(|b| b.created_at.is_some_and(|at| same_month(at.date(), today)))
        .count();

    let total_booking_value = sum_amounts(bookings.iter().map(|b| &b.total_amount));
    let total_stay_days: i64 = bookings
        .iter()
        .map(|b| {
            let (from, to) = if b.check_out >= b.check_in {
                (b.check_in, b.check_out)
            } else {
                (b.check_out, b.check_in)
            };
            billable_units(DurationType::Daily, from, to)
        })
        .sum();

    let completed_payments = input
        .payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Completed)
        .count();

    let customers_with_bookings = bookings
        .iter()
        .map(|b| normalize_phone(&b.customer_phone_number))
        .collect::<BTreeSet<_>>()
        .len();
    let total_customers = input.customers.len();

    let mut per_room: BTreeMap<i64, usize> = BTreeMap::new();
    for b in bookings {
        *per_room.entry(b.room_id).or_default() += 1;
    }
    // BTreeMap iterates by ascending id, so the first maximum is the lowest id.
    let top_room = per_room
        .iter()
        .fold(None, |best: Option<(i64, usize)>, (&id, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((id, count)),
        });

    let mut payment_methods: BTreeMap<String, usize> = BTreeMap::new();
    for p in input.payments {
        *payment_methods.entry(p.method.as_str().to_string()).or_default() += 1;
    }

    let mut expense_categories: BTreeMap<String, f64> = BTreeMap::new();
    for e in input.expenses {
        let category = if e.category.trim().is_empty() {
            OTHER_CATEGORY.to_string()
        } else {
            e.category.clone()
        };
        *expense_categories.entry(category).or_default() += e.amount.value();
    }

    DashboardStats {
        today_revenue,
        this_month_revenue,
        today_expenses,
        this_month_expenses,
        net_profit_today: today_revenue - today_expenses,
        net_profit_this_month: this_month_revenue - this_month_expenses,
        bookings_created_today,
        bookings_created_this_month,
        total_bookings,
        confirmed_bookings,
        pending_bookings,
        checked_out_bookings,
        avg_booking_value: average(total_booking_value, total_bookings),
        avg_stay_days: average(total_stay_days as f64, total_bookings),
        payment_collection_rate: percentage(completed_payments, input.payments.len()),
        total_customers,
        customers_with_bookings,
        customer_retention_rate: percentage(customers_with_bookings, total_customers),
        top_room,
        payment_methods,
        expense_categories,
        booking_conversion_rate: percentage(confirmed_bookings, total_bookings),
    }
}

//=========================================================================================
// Front-desk summary for one day
//=========================================================================================

/// A guest arriving or leaving on the summary day.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementLine {
    pub booking_id: i64,
    pub customer_name: String,
    pub room_number: String,
    pub phone_number: String,
    pub status: BookingStatus,
}

/// A booking with money still owed.
#[derive(Debug, Clone, PartialEq)]
pub struct DueLine {
    pub booking_id: i64,
    pub customer_name: String,
    pub room_number: String,
    pub phone_number: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_amount: f64,
    pub total_paid: f64,
    pub due_amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TodaySummary {
    pub date: NaiveDate,
    pub total_customers: usize,
    pub total_rooms: usize,
    pub occupied_rooms: usize,
    pub available_rooms: usize,
    /// Percentage, rounded to two decimals.
    pub occupancy_rate: f64,
    /// Bookings that start or end on the day.
    pub todays_bookings: usize,
    pub check_ins: Vec<MovementLine>,
    pub check_outs: Vec<MovementLine>,
    pub pending_dues: Vec<DueLine>,
    pub collected_today: f64,
}

struct Labels<'a> {
    directory: CustomerDirectory<'a>,
    room_numbers: HashMap<i64, &'a str>,
}

impl<'a> Labels<'a> {
    fn new(input: &DashboardInput<'a>) -> Self {
        Self {
            directory: CustomerDirectory::new(input.customers),
            room_numbers: input
                .rooms
                .iter()
                .map(|r| (r.id, r.room_number.as_str()))
                .collect(),
        }
    }

    fn customer_name(&self, phone: &str) -> String {
        self.directory
            .lookup(phone)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string())
    }

    fn room_number(&self, room_id: i64) -> String {
        match self.room_numbers.get(&room_id) {
            Some(number) => number.to_string(),
            None => format!("Room {room_id}"),
        }
    }

    fn movement(&self, b: &Booking) -> MovementLine {
        MovementLine {
            booking_id: b.id,
            customer_name: self.customer_name(&b.customer_phone_number),
            room_number: self.room_number(b.room_id),
            phone_number: b.customer_phone_number.clone(),
            status: b.status,
        }
    }
}

/// Builds the front-desk summary for `date`.
///
/// Arrivals are CONFIRMED bookings checking in on `date`; departures are
/// CHECKEDIN bookings checking out on `date`. A catalog room is occupied when a
/// non-cancelled booking covers the day, by the same rule as the grid. Dues are computed from the
/// payments attached to each booking.
pub fn today_summary(input: &DashboardInput<'_>, date: NaiveDate) -> TodaySummary {
    let labels = Labels::new(input);
    let bookings = input.bookings;

    let check_ins = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed && b.check_in.date() == date)
        .map(|b| labels.movement(b))
        .collect();
    let check_outs = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::CheckedIn && b.check_out.date() == date)
        .map(|b| labels.movement(b))
        .collect();

    let todays_bookings = bookings
        .iter()
        .filter(|b| b.check_in.date() == date || b.check_out.date() == date)
        .count();

    let catalog_ids: BTreeSet<i64> = input.rooms.iter().map(|r| r.id).collect();
    let occupied_rooms = bookings
        .iter()
        .filter(|b| !b.is_cancelled() && b.occupies(date) && catalog_ids.contains(&b.room_id))
        .map(|b| b.room_id)
        .collect::<BTreeSet<_>>()
        .len();
    let total_rooms = input.rooms.len();

    let pending_dues = bookings
        .iter()
        .filter(|b| !b.is_cancelled())
        .filter_map(|b| {
            let breakdown = calculate_payment_breakdown(b);
            (breakdown.due_amount > 0.0).then(|| DueLine {
                booking_id: b.id,
                customer_name: labels.customer_name(&b.customer_phone_number),
                room_number: labels.room_number(b.room_id),
                phone_number: b.customer_phone_number.clone(),
                check_in: b.check_in.date(),
                check_out: b.check_out.date(),
                total_amount: breakdown.total_amount,
                total_paid: breakdown.total_paid,
                due_amount: breakdown.due_amount,
            })
        })
        .collect();

    let collected_today = sum_amounts(
        input
            .payments
            .iter()
            .filter(|p| p.paid_at.is_some_and(|at| at.date() == date))
            .map(|p| &p.amount),
    );

    TodaySummary {
        date,
        total_customers: input.customers.len(),
        total_rooms,
        occupied_rooms,
        available_rooms: total_rooms - occupied_rooms,
        occupancy_rate: round2(percentage(occupied_rooms, total_rooms)),
        todays_bookings,
        check_ins,
        check_outs,
        pending_dues,
        collected_today,
    }
}
