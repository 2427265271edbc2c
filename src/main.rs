// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Runlog-Tracker API Server
//!
//! Serves the running-log client: runs, profile, dashboard, races and
//! weather, with state kept in local JSON records.

use runlog_tracker::{
    config::Config,
    db::LocalStore,
    services::{EventsClient, GeminiClient, ProfileState, RunRepository, WeatherClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Runlog-Tracker API");

    // Open the local store and load state. A record that no longer parses
    // stops startup rather than being replaced with an empty one.
    let store = LocalStore::open(&config.data_dir)?;
    let runs = RunRepository::load(store.clone()).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load run logs");
    })?;
    let profile = ProfileState::load(store).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load user profile");
    })?;

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; advice and photo analysis use fallbacks");
    }

    // Build shared state
    let state = Arc::new(AppState {
        gemini: GeminiClient::from_config(&config),
        events: EventsClient::from_config(&config),
        weather: WeatherClient::from_config(&config),
        runs,
        profile,
        config: config.clone(),
    });

    // Build router
    let app = runlog_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("runlog_tracker=debug,info")),
        )
        .with(format)
        .init();
}
