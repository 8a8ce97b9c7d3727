pub mod middleware;
pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub use middleware::log_requests;
pub use rest::ApiDoc;
pub use state::AppState;

/// Builds the API router with every route and the request logger.
///
/// CORS and the Swagger UI are layered on by the binary.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(rest::health_handler))
        .route("/pricing/quote", post(rest::quote_handler))
        .route(
            "/bookings/{id}/payment-breakdown",
            get(rest::payment_breakdown_handler),
        )
        .route("/grid", get(rest::grid_handler))
        .route("/rooms/availability", get(rest::availability_handler))
        .route("/dashboard/stats", get(rest::dashboard_stats_handler))
        .route("/dashboard/today-summary", get(rest::today_summary_handler))
        .route(
            "/booking-requests/pending",
            get(rest::pending_requests_handler),
        )
        .layer(axum_middleware::from_fn(log_requests))
        .with_state(app_state)
}
