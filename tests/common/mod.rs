// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use runlog_tracker::config::Config;
use runlog_tracker::db::LocalStore;
use runlog_tracker::routes::create_router;
use runlog_tracker::services::{
    EventsClient, GeminiClient, ProfileState, RunRepository, WeatherClient,
};
use runlog_tracker::AppState;
use std::sync::Arc;

/// Nothing listens here; outbound calls fail fast with connection refused.
#[allow(dead_code)]
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

/// Config whose external services are all unreachable.
#[allow(dead_code)]
pub fn offline_config() -> Config {
    Config {
        gemini_base_url: UNREACHABLE.to_string(),
        events_api_url: UNREACHABLE.to_string(),
        weather_api_url: UNREACHABLE.to_string(),
        ..Config::default()
    }
}

/// Create a test app over `store` with the given config.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config, store: LocalStore) -> (axum::Router, Arc<AppState>) {
    let runs = RunRepository::load(store.clone()).expect("Failed to load runs");
    let profile = ProfileState::load(store).expect("Failed to load profile");

    let state = Arc::new(AppState {
        gemini: GeminiClient::from_config(&config),
        events: EventsClient::from_config(&config),
        weather: WeatherClient::from_config(&config),
        runs,
        profile,
        config,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with an in-memory store and no reachable services.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(offline_config(), LocalStore::in_memory())
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
