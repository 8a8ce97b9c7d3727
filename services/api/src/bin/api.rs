//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{InMemoryDataSource, RestBackendAdapter, SystemClock},
    config::Config,
    error::ApiError,
    web::{build_router, rest::ApiDoc, state::AppState},
};
use axum::http::{header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE}, HeaderValue, Method};
use axum::Router;
use guesthouse_core::ports::BookingDataSource;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Choose the Booking Data Source ---
    let source: Arc<dyn BookingDataSource> = match (&config.snapshot_path, &config.backend_url) {
        (Some(path), _) => {
            if config.backend_url.is_some() {
                warn!("SNAPSHOT_PATH is set; BACKEND_URL is ignored");
            }
            Arc::new(InMemoryDataSource::from_file(path).await?)
        }
        (None, Some(url)) => {
            info!("Reading bookings from {}", url);
            Arc::new(RestBackendAdapter::new(
                url,
                config.backend_api_token.clone(),
                config.backend_timeout,
            )?)
        }
        (None, None) => {
            return Err(ApiError::Internal(
                "Either BACKEND_URL or SNAPSHOT_PATH is required".to_string(),
            ))
        }
    };

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        source,
        clock: Arc::new(SystemClock),
        config: config.clone(),
    });

    let origin = config.cors_allowed_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!(
            "Invalid CORS_ALLOWED_ORIGIN '{}': {}",
            config.cors_allowed_origin, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    let app = Router::new()
        .merge(build_router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutdown signal received, draining connections...");
                    shutdown.cancel();
                }
                Err(e) => warn!("Cannot listen for the shutdown signal: {}", e),
            }
        }
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("Server stopped.");
    Ok(())
}
