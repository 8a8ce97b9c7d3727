//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// The widest grid window, in days, that the service will build.
pub const MAX_GRID_DAYS: usize = 366;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Base URL of the booking backend, e.g. `http://localhost:8082/api/v1`.
    pub backend_url: Option<String>,
    /// A JSON snapshot file served instead of the live backend.
    pub snapshot_path: Option<PathBuf>,
    pub backend_api_token: Option<String>,
    pub backend_timeout: Duration,
    pub log_level: Level,
    pub grid_days_before: u32,
    pub grid_days_after: u32,
    pub cors_allowed_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_allowed_origin = std::env::var("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        // --- Load Backend Settings ---
        let backend_url = std::env::var("BACKEND_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string());
        let snapshot_path = std::env::var("SNAPSHOT_PATH").ok().map(PathBuf::from);
        if backend_url.is_none() && snapshot_path.is_none() {
            return Err(ConfigError::MissingVar("BACKEND_URL".to_string()));
        }
        let backend_api_token = std::env::var("BACKEND_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let backend_timeout = Duration::from_secs(parse_var("BACKEND_TIMEOUT_SECS", 10)?);

        // --- Load Grid Window Settings ---
        let grid_days_before = parse_var("GRID_DAYS_BEFORE", 1)?;
        let grid_days_after = parse_var("GRID_DAYS_AFTER", 30)?;
        check_grid_days(grid_days_before, grid_days_after)?;

        Ok(Self {
            bind_address,
            backend_url,
            snapshot_path,
            backend_api_token,
            backend_timeout,
            log_level,
            grid_days_before,
            grid_days_after,
            cors_allowed_origin,
        })
    }
}

/// Reads an optional numeric variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// The default window covers `before + 1 + after` days and must fit the grid cap.
fn check_grid_days(before: u32, after: u32) -> Result<(), ConfigError> {
    let span = u64::from(before) + u64::from(after) + 1;
    if span > MAX_GRID_DAYS as u64 {
        return Err(ConfigError::InvalidValue(
            "GRID_DAYS_BEFORE/GRID_DAYS_AFTER".to_string(),
            format!("the default window spans {} days, more than {}", span, MAX_GRID_DAYS),
        ));
    }
    Ok(())
}
