// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Runlog-Tracker: a personal running journal backend.
//!
//! This crate provides the API behind the running-log client: logged
//! runs with derived pace, a profile, dashboard aggregates, AI photo
//! analysis and advice, upcoming races and the current weather.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{EventsClient, GeminiClient, ProfileState, RunRepository, WeatherClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub runs: RunRepository,
    pub profile: ProfileState,
    pub gemini: GeminiClient,
    pub events: EventsClient,
    pub weather: WeatherClient,
}
