//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.
//!
//! Every handler reads fresh snapshots through the `BookingDataSource` port and
//! hands them to the pure computations in `guesthouse_core`.

use crate::adapters::records::{amount_from_json, parse_date, parse_datetime};
use crate::config::MAX_GRID_DAYS;
use crate::error::{bad_request, port_failure, server_fault, HandlerError};
use crate::web::protocol::{
    AvailabilityQuery, AvailabilityResponse, DashboardStatsResponse, DueDto, GridQuery,
    GridResponse, GridRowDto, HealthResponse, MovementDto, OccupantDto, PaymentBreakdownResponse,
    PendingRequestDto, QuoteRequest, QuoteResponse, RoomDto, SummaryQuery, TodaySummaryResponse,
    TopRoomDto,
};
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use guesthouse_core::domain::{Customer, DurationType};
use guesthouse_core::numeric::Amount;
use guesthouse_core::{
    attach_payments, available_rooms, build_availability_grid, calculate_payment_breakdown,
    compute_stats, find_configuration, quote, requests, today_summary, BookingForm,
    CustomerDirectory, DashboardInput, GridOptions, GridWindow, RateCard,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        quote_handler,
        payment_breakdown_handler,
        grid_handler,
        availability_handler,
        dashboard_stats_handler,
        today_summary_handler,
        pending_requests_handler,
    ),
    components(
        schemas(
            HealthResponse,
            QuoteRequest,
            QuoteResponse,
            PaymentBreakdownResponse,
            GridResponse,
            GridRowDto,
            OccupantDto,
            AvailabilityResponse,
            RoomDto,
            DashboardStatsResponse,
            TopRoomDto,
            TodaySummaryResponse,
            MovementDto,
            DueDto,
            PendingRequestDto,
        )
    ),
    tags(
        (name = "Guest House API", description = "Pricing, payment, occupancy and dashboard computations over the booking backend.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Helpers
//=========================================================================================

fn amount_of(value: &Option<Value>) -> Amount {
    value.as_ref().map(amount_from_json).unwrap_or_default()
}

fn datetime_param(name: &str, raw: &str) -> Result<chrono::NaiveDateTime, HandlerError> {
    parse_datetime(raw).ok_or_else(|| bad_request(format!("Invalid {}: '{}'", name, raw)))
}

fn date_param(name: &str, raw: &str) -> Result<NaiveDate, HandlerError> {
    parse_date(raw).ok_or_else(|| bad_request(format!("Invalid {}: '{}'", name, raw)))
}

/// Duplicate phone keys make name lookups ambiguous; the first record is used.
fn warn_duplicate_customers(customers: &[Customer]) {
    let directory = CustomerDirectory::new(customers);
    for phone in directory.duplicates() {
        warn!("Several customer records share phone {}; using the first", phone);
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Price a booking form.
///
/// Validates the form first. When the body carries no rates, the room configuration
/// for `roomId` and `personCount` supplies them.
#[utoipa::path(
    post,
    path = "/pricing/quote",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "The priced form", body = QuoteResponse),
        (status = 400, description = "Invalid form (missing rate, bad dates)"),
        (status = 404, description = "No configuration for the room and occupancy"),
        (status = 502, description = "Booking backend unavailable")
    )
)]
pub async fn quote_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<QuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let duration_type = match body.duration_type.as_deref() {
        Some(raw) => raw.parse::<DurationType>().map_err(bad_request)?,
        None => DurationType::Daily,
    };
    let check_in = datetime_param("checkIn", &body.check_in)?;
    let check_out = datetime_param("checkOut", &body.check_out)?;

    let rates = if body.daily_cost.is_some() || body.monthly_cost.is_some() {
        RateCard {
            daily_cost: amount_of(&body.daily_cost),
            monthly_cost: amount_of(&body.monthly_cost),
        }
    } else if let (Some(room_id), Some(person_count)) = (body.room_id, body.person_count) {
        let configs = app_state
            .source
            .list_room_configurations()
            .await
            .map_err(|e| port_failure("room configurations", e))?;
        let config = find_configuration(&configs, room_id, person_count).ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!(
                    "No price configured for room {} with {} people",
                    room_id, person_count
                ),
            )
        })?;
        RateCard::from(config)
    } else {
        RateCard::default()
    };

    let form = BookingForm {
        rates,
        duration_type,
        check_in,
        check_out,
        early_checkin_cost: amount_of(&body.early_checkin_cost),
        late_checkout_cost: amount_of(&body.late_checkout_cost),
    };
    let priced = quote(&form).map_err(bad_request)?;
    debug!(
        "Quoted {} {} units: {}",
        priced.units,
        duration_type.as_str(),
        priced.total_cost
    );
    Ok(Json(QuoteResponse::from(priced)))
}

/// Reconcile a booking's payments against its total.
#[utoipa::path(
    get,
    path = "/bookings/{id}/payment-breakdown",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Totals, paid and due", body = PaymentBreakdownResponse),
        (status = 404, description = "No such booking"),
        (status = 502, description = "Booking backend unavailable")
    )
)]
pub async fn payment_breakdown_handler(
    State(app_state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
) -> Result<impl IntoResponse, HandlerError> {
    let booking = app_state
        .source
        .get_booking(booking_id)
        .await
        .map_err(|e| port_failure("booking", e))?;
    let breakdown = calculate_payment_breakdown(&booking);
    Ok(Json(PaymentBreakdownResponse::new(booking_id, breakdown)))
}

/// Build the room × date occupancy grid.
#[utoipa::path(
    get,
    path = "/grid",
    params(GridQuery),
    responses(
        (status = 200, description = "The occupancy grid", body = GridResponse),
        (status = 400, description = "Invalid or inverted window"),
        (status = 500, description = "Default window misconfigured"),
        (status = 502, description = "Booking backend unavailable")
    )
)]
pub async fn grid_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<GridQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let config = &app_state.config;
    let default_window = GridWindow::around(
        app_state.clock.today(),
        config.grid_days_before,
        config.grid_days_after,
    )
    .map_err(|e| server_fault("the default grid window", e))?;
    let start = match query.start.as_deref() {
        Some(raw) => date_param("start", raw)?,
        None => default_window.start(),
    };
    let end = match query.end.as_deref() {
        Some(raw) => date_param("end", raw)?,
        None => default_window.end(),
    };
    let window = GridWindow::new(start, end).map_err(bad_request)?;
    if window.day_count() > MAX_GRID_DAYS {
        return Err(bad_request(format!(
            "Grid window is {} days; at most {} are allowed",
            window.day_count(),
            MAX_GRID_DAYS
        )));
    }

    let source = &app_state.source;
    let (bookings, rooms, customers) = tokio::try_join!(
        source.list_bookings(),
        source.list_rooms(),
        source.list_customers()
    )
    .map_err(|e| port_failure("grid data", e))?;
    warn_duplicate_customers(&customers);

    let options = GridOptions {
        include_unbooked_rooms: query.include_unbooked_rooms.unwrap_or(false),
    };
    let grid = build_availability_grid(&bookings, &rooms, &customers, window, options);
    info!(
        "Built grid {}..{}: {} rooms, {} occupied cells",
        window.start(),
        window.end(),
        grid.rooms.len(),
        grid.occupied_count()
    );
    Ok(Json(GridResponse::from(grid)))
}

/// List the rooms free for a whole requested stay.
#[utoipa::path(
    get,
    path = "/rooms/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Rooms without a confirmed or checked-in overlap", body = AvailabilityResponse),
        (status = 400, description = "Invalid date range"),
        (status = 502, description = "Booking backend unavailable")
    )
)]
pub async fn availability_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let check_in = datetime_param("checkIn", &query.check_in)?;
    let check_out = datetime_param("checkOut", &query.check_out)?;

    let source = &app_state.source;
    let (rooms, bookings) = tokio::try_join!(source.list_rooms(), source.list_bookings())
        .map_err(|e| port_failure("availability data", e))?;

    let free = available_rooms(&rooms, &bookings, check_in, check_out).map_err(bad_request)?;
    Ok(Json(AvailabilityResponse {
        check_in,
        check_out,
        rooms: free.into_iter().map(RoomDto::from).collect(),
    }))
}

/// Owner statistics as of now.
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    responses(
        (status = 200, description = "Financial and operational statistics", body = DashboardStatsResponse),
        (status = 502, description = "Booking backend unavailable")
    )
)]
pub async fn dashboard_stats_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let source = &app_state.source;
    let (rooms, customers, bookings, payments, expenses) = tokio::try_join!(
        source.list_rooms(),
        source.list_customers(),
        source.list_bookings(),
        source.list_payments(),
        source.list_expenses()
    )
    .map_err(|e| port_failure("dashboard data", e))?;

    let input = DashboardInput {
        rooms: &rooms,
        customers: &customers,
        bookings: &bookings,
        payments: &payments,
        expenses: &expenses,
    };
    let stats = compute_stats(&input, app_state.clock.now());
    Ok(Json(DashboardStatsResponse::from(stats)))
}

/// Front-desk summary for one day: arrivals, departures, occupancy and dues.
#[utoipa::path(
    get,
    path = "/dashboard/today-summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "The day's summary", body = TodaySummaryResponse),
        (status = 400, description = "Invalid date"),
        (status = 502, description = "Booking backend unavailable")
    )
)]
pub async fn today_summary_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let date = match query.date.as_deref() {
        Some(raw) => date_param("date", raw)?,
        None => app_state.clock.today(),
    };

    let source = &app_state.source;
    let (rooms, customers, mut bookings, payments) = tokio::try_join!(
        source.list_rooms(),
        source.list_customers(),
        source.list_bookings(),
        source.list_payments()
    )
    .map_err(|e| port_failure("summary data", e))?;
    warn_duplicate_customers(&customers);
    attach_payments(&mut bookings, &payments);

    let input = DashboardInput {
        rooms: &rooms,
        customers: &customers,
        bookings: &bookings,
        payments: &payments,
        expenses: &[],
    };
    Ok(Json(TodaySummaryResponse::from(today_summary(&input, date))))
}

/// Booking requests waiting for a staff decision, each priced for review.
#[utoipa::path(
    get,
    path = "/booking-requests/pending",
    responses(
        (status = 200, description = "Pending requests", body = [PendingRequestDto]),
        (status = 502, description = "Booking backend unavailable")
    )
)]
pub async fn pending_requests_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let all = app_state
        .source
        .list_booking_requests()
        .await
        .map_err(|e| port_failure("booking requests", e))?;
    let waiting: Vec<PendingRequestDto> = requests::pending(&all)
        .into_iter()
        .map(PendingRequestDto::from)
        .collect();
    Ok(Json(waiting))
}
