//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged with the front-desk client. Field names are
//! camelCase to match the booking backend the client already talks to.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use guesthouse_core::dashboard::{DueLine, MovementLine};
use guesthouse_core::domain::{BookingRequest, Room};
use guesthouse_core::grid::{AvailabilityGrid, GridCell};
use guesthouse_core::{DashboardStats, PaymentBreakdown, Quote, TodaySummary};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Requests and Query Strings
//=========================================================================================

/// A booking form to price.
///
/// Rates are taken from the body when either is present; otherwise they are looked
/// up from the room configuration for `roomId` and `personCount`. Amounts may be
/// numbers or numeric strings.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// `DAILY` (default) or `MONTHLY`.
    pub duration_type: Option<String>,
    pub check_in: String,
    pub check_out: String,
    #[schema(value_type = Option<f64>)]
    pub daily_cost: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub monthly_cost: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub early_checkin_cost: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub late_checkout_cost: Option<Value>,
    pub room_id: Option<i64>,
    pub person_count: Option<u32>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GridQuery {
    /// First day shown (`YYYY-MM-DD`). Defaults to the configured days before today.
    pub start: Option<String>,
    /// Last day shown, inclusive.
    pub end: Option<String>,
    /// Also list catalog rooms that have no bookings.
    pub include_unbooked_rooms: Option<bool>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    pub check_in: String,
    pub check_out: String,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Day to summarise (`YYYY-MM-DD`). Defaults to today.
    pub date: Option<String>,
}

//=========================================================================================
// Responses
//=========================================================================================

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub duration_type: String,
    pub units: i64,
    pub unit_rate: f64,
    pub base_cost: f64,
    pub surcharges: f64,
    pub total_cost: f64,
}

impl From<Quote> for QuoteResponse {
    fn from(q: Quote) -> Self {
        Self {
            duration_type: q.duration_type.as_str().to_string(),
            units: q.units,
            unit_rate: q.unit_rate,
            base_cost: q.base_cost,
            surcharges: q.surcharges,
            total_cost: q.total_cost,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdownResponse {
    pub booking_id: i64,
    pub total_amount: f64,
    pub total_paid: f64,
    pub due_amount: f64,
    pub payment_count: usize,
    pub settled: bool,
    pub overpaid: bool,
}

impl PaymentBreakdownResponse {
    pub fn new(booking_id: i64, breakdown: PaymentBreakdown) -> Self {
        Self {
            booking_id,
            total_amount: breakdown.total_amount,
            total_paid: breakdown.total_paid,
            due_amount: breakdown.due_amount,
            payment_count: breakdown.payment_count,
            settled: breakdown.is_settled(),
            overpaid: breakdown.is_overpaid(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupantDto {
    pub booking_id: i64,
    pub customer_name: String,
    pub phone_number: String,
    pub status: String,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridRowDto {
    pub room_id: i64,
    pub room_number: String,
    pub room_type: Option<String>,
    pub in_catalog: bool,
    /// One entry per date; `null` means free.
    pub cells: Vec<Option<OccupantDto>>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridResponse {
    pub dates: Vec<String>,
    pub rooms: Vec<GridRowDto>,
    pub occupied_count: usize,
}

impl From<AvailabilityGrid> for GridResponse {
    fn from(grid: AvailabilityGrid) -> Self {
        let dates = grid.date_labels();
        let occupied_count = grid.occupied_count();
        let rooms = grid
            .rooms
            .into_iter()
            .zip(grid.cells)
            .map(|(room, row)| GridRowDto {
                room_id: room.room_id,
                room_number: room.room_number,
                room_type: room.room_type,
                in_catalog: room.in_catalog,
                cells: row
                    .into_iter()
                    .map(|cell| match cell {
                        GridCell::Empty => None,
                        GridCell::Occupied(o) => Some(OccupantDto {
                            booking_id: o.booking_id,
                            customer_name: o.customer_name,
                            phone_number: o.phone_number,
                            status: o.status.as_str().to_string(),
                        }),
                    })
                    .collect(),
            })
            .collect();
        Self {
            dates,
            rooms,
            occupied_count,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub id: i64,
    pub room_number: String,
    pub room_type: Option<String>,
    pub bathroom_type: Option<String>,
}

impl From<&Room> for RoomDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            room_number: room.room_number.clone(),
            room_type: room.room_type.clone(),
            bathroom_type: room.bathroom_type.clone(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub rooms: Vec<RoomDto>,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopRoomDto {
    pub room_id: i64,
    pub booking_count: usize,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
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
    pub top_room: Option<TopRoomDto>,
    pub payment_methods: BTreeMap<String, usize>,
    pub expense_categories: BTreeMap<String, f64>,
    pub booking_conversion_rate: f64,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(s: DashboardStats) -> Self {
        Self {
            today_revenue: s.today_revenue,
            this_month_revenue: s.this_month_revenue,
            today_expenses: s.today_expenses,
            this_month_expenses: s.this_month_expenses,
            net_profit_today: s.net_profit_today,
            net_profit_this_month: s.net_profit_this_month,
            bookings_created_today: s.bookings_created_today,
            bookings_created_this_month: s.bookings_created_this_month,
            total_bookings: s.total_bookings,
            confirmed_bookings: s.confirmed_bookings,
            pending_bookings: s.pending_bookings,
            checked_out_bookings: s.checked_out_bookings,
            avg_booking_value: s.avg_booking_value,
            avg_stay_days: s.avg_stay_days,
            payment_collection_rate: s.payment_collection_rate,
            total_customers: s.total_customers,
            customers_with_bookings: s.customers_with_bookings,
            customer_retention_rate: s.customer_retention_rate,
            top_room: s.top_room.map(|(room_id, booking_count)| TopRoomDto {
                room_id,
                booking_count,
            }),
            payment_methods: s.payment_methods,
            expense_categories: s.expense_categories,
            booking_conversion_rate: s.booking_conversion_rate,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementDto {
    pub booking_id: i64,
    pub customer_name: String,
    pub room_number: String,
    pub phone_number: String,
    pub status: String,
}

impl From<MovementLine> for MovementDto {
    fn from(line: MovementLine) -> Self {
        Self {
            booking_id: line.booking_id,
            customer_name: line.customer_name,
            room_number: line.room_number,
            phone_number: line.phone_number,
            status: line.status.as_str().to_string(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DueDto {
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

impl From<DueLine> for DueDto {
    fn from(line: DueLine) -> Self {
        Self {
            booking_id: line.booking_id,
            customer_name: line.customer_name,
            room_number: line.room_number,
            phone_number: line.phone_number,
            check_in: line.check_in,
            check_out: line.check_out,
            total_amount: line.total_amount,
            total_paid: line.total_paid,
            due_amount: line.due_amount,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummaryResponse {
    pub date: NaiveDate,
    pub total_customers: usize,
    pub total_rooms: usize,
    pub occupied_rooms: usize,
    pub available_rooms: usize,
    pub occupancy_rate: f64,
    pub todays_bookings: usize,
    pub check_ins: Vec<MovementDto>,
    pub check_outs: Vec<MovementDto>,
    pub pending_dues: Vec<DueDto>,
    pub collected_today: f64,
}

impl From<TodaySummary> for TodaySummaryResponse {
    fn from(s: TodaySummary) -> Self {
        Self {
            date: s.date,
            total_customers: s.total_customers,
            total_rooms: s.total_rooms,
            occupied_rooms: s.occupied_rooms,
            available_rooms: s.available_rooms,
            occupancy_rate: s.occupancy_rate,
            todays_bookings: s.todays_bookings,
            check_ins: s.check_ins.into_iter().map(MovementDto::from).collect(),
            check_outs: s.check_outs.into_iter().map(MovementDto::from).collect(),
            pending_dues: s.pending_dues.into_iter().map(DueDto::from).collect(),
            collected_today: s.collected_today,
        }
    }
}

/// A pending request with the price staff would see when reviewing it.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequestDto {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub room_id: i64,
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
    pub duration_type: String,
    pub number_of_people: u32,
    /// The total the customer was shown when submitting.
    pub requested_total: f64,
    pub quote: Option<QuoteResponse>,
    /// Why the request could not be priced, when it could not.
    pub quote_error: Option<String>,
    pub remarks: Option<String>,
}

impl From<&BookingRequest> for PendingRequestDto {
    fn from(r: &BookingRequest) -> Self {
        let (quote, quote_error) = match r.quote() {
            Ok(q) => (Some(QuoteResponse::from(q)), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            id: r.id,
            customer_name: r.customer_name.clone(),
            customer_phone: r.customer_phone.clone(),
            room_id: r.room_id,
            check_in: r.check_in,
            check_out: r.check_out,
            duration_type: r.duration_type.as_str().to_string(),
            number_of_people: r.number_of_people,
            requested_total: r.total_amount.value(),
            quote,
            quote_error,
            remarks: r.remarks.clone(),
        }
    }
}
