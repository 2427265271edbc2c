// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development. Only the Gemini API
//! key is sensitive, and it is optional: without it the AI features fall
//! back to their fixed texts.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Directory holding the JSON records (runs, profile)
    pub data_dir: PathBuf,
    /// Frontend URL for CORS
    pub frontend_url: String,

    // --- Generative AI ---
    /// Gemini API key (advice and photo analysis are skipped without it)
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    pub gemini_model: String,
    /// Gemini REST base URL
    pub gemini_base_url: String,

    // --- Races ---
    /// Recommended-events endpoint
    pub events_api_url: String,
    /// `Language` query parameter
    pub events_language: String,
    /// `Size` query parameter
    pub events_page_size: u32,

    // --- Weather ---
    /// Forecast endpoint (Open-Meteo compatible)
    pub weather_api_url: String,
    pub weather_latitude: f64,
    pub weather_longitude: f64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            data_dir: PathBuf::from("data"),
            frontend_url: "http://localhost:5173".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            events_api_url: "https://russiarunning.com/api/events/recommendedEvents".to_string(),
            events_language: "ru".to_string(),
            events_page_size: 50,
            weather_api_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            weather_latitude: 55.7558,
            weather_longitude: 37.6173,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a default; only malformed numbers are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),

            gemini_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),

            events_api_url: env::var("EVENTS_API_URL").unwrap_or(defaults.events_api_url),
            events_language: env::var("EVENTS_LANGUAGE").unwrap_or(defaults.events_language),
            events_page_size: parse_var("EVENTS_PAGE_SIZE", defaults.events_page_size)?,

            weather_api_url: env::var("WEATHER_API_URL").unwrap_or(defaults.weather_api_url),
            weather_latitude: parse_var("WEATHER_LATITUDE", defaults.weather_latitude)?,
            weather_longitude: parse_var("WEATHER_LONGITUDE", defaults.weather_longitude)?,
        })
    }
}

/// Read and parse an optional variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test touching the process environment so parallel tests don't race.
    #[test]
    fn test_config_from_env() {
        env::set_var("PORT", "9090");
        env::set_var("DATA_DIR", "/tmp/runlog-test");
        env::set_var("GEMINI_API_KEY", "  test_key  ");
        env::set_var("WEATHER_LATITUDE", "59.93");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 9090);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/runlog-test"));
        assert_eq!(config.gemini_api_key.as_deref(), Some("test_key"));
        assert_eq!(config.weather_latitude, 59.93);
        assert_eq!(config.events_page_size, 50);

        env::set_var("EVENTS_PAGE_SIZE", "many");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "EVENTS_PAGE_SIZE",
                ..
            }
        ));

        for name in [
            "PORT",
            "DATA_DIR",
            "GEMINI_API_KEY",
            "WEATHER_LATITUDE",
            "EVENTS_PAGE_SIZE",
        ] {
            env::remove_var(name);
        }
    }
}
