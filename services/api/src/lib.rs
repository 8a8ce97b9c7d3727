//! services/api/src/lib.rs
//!
//! The HTTP service around `guesthouse_core`: backend adapters, configuration,
//! errors and the Axum web layer. The binaries in `src/bin` wire these together.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
