// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current weather from an Open-Meteo compatible forecast API.
//!
//! Decorative only: a failed lookup yields `None` and the dashboard simply
//! omits the widget.

use crate::config::Config;
use crate::models::Weather;
use crate::services::http::{build_client, check_response_json, ClientError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(alias = "current_weather")]
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    #[serde(alias = "temperature")]
    temperature_2m: f64,
    #[serde(alias = "weathercode")]
    weather_code: u16,
}

/// Forecast API client for a fixed location.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    url: String,
    latitude: f64,
    longitude: f64,
}

impl WeatherClient {
    pub fn new(url: String, latitude: f64, longitude: f64) -> Self {
        Self {
            http: build_client(),
            url,
            latitude,
            longitude,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.weather_api_url.clone(),
            config.weather_latitude,
            config.weather_longitude,
        )
    }

    /// Current conditions, or `None` if the lookup failed.
    pub async fn current(&self) -> Option<Weather> {
        match self.fetch_current().await {
            Ok(weather) => Some(weather),
            Err(e) => {
                tracing::debug!(error = %e, "Weather unavailable");
                None
            }
        }
    }

    async fn fetch_current(&self) -> Result<Weather, ClientError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("current", "temperature_2m,weather_code".to_string()),
            ])
            .send()
            .await?;

        let body: ForecastResponse = check_response_json(response).await?;
        Ok(Weather::new(
            body.current.temperature_2m,
            body.current.weather_code,
        ))
    }
}
