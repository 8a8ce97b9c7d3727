//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use guesthouse_core::ports::{BookingDataSource, Clock};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn BookingDataSource>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<Config>,
}
