// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current weather for the dashboard widget.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Icon category for a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WeatherIcon {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

impl WeatherIcon {
    /// Map a WMO code to an icon by threshold bands:
    /// clear (0-2), overcast and fog (3-49), drizzle and rain (50-69),
    /// snow, showers and storms (70+).
    pub fn from_code(code: u16) -> Self {
        match code {
            0..=2 => Self::Sunny,
            3..=49 => Self::Cloudy,
            50..=69 => Self::Rainy,
            _ => Self::Snowy,
        }
    }
}

/// Current conditions at the configured location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Weather {
    /// Air temperature in °C
    pub temperature: f64,
    pub weather_code: u16,
    pub icon: WeatherIcon,
}

impl Weather {
    pub fn new(temperature: f64, weather_code: u16) -> Self {
        Self {
            temperature,
            weather_code,
            icon: WeatherIcon::from_code(weather_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_bands() {
        assert_eq!(WeatherIcon::from_code(0), WeatherIcon::Sunny);
        assert_eq!(WeatherIcon::from_code(2), WeatherIcon::Sunny);
        assert_eq!(WeatherIcon::from_code(3), WeatherIcon::Cloudy);
        assert_eq!(WeatherIcon::from_code(45), WeatherIcon::Cloudy);
        assert_eq!(WeatherIcon::from_code(61), WeatherIcon::Rainy);
        assert_eq!(WeatherIcon::from_code(71), WeatherIcon::Snowy);
        assert_eq!(WeatherIcon::from_code(95), WeatherIcon::Snowy);
    }
}
