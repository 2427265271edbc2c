// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upcoming race events and the Races page states.

use chrono::{DateTime, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Title used when the upstream event has none.
pub const UNTITLED_EVENT: &str = "Название события";

/// Message for the empty Races page.
pub const NO_RACES_MESSAGE: &str = "Соревнований не найдено";

/// Message for the failed Races page.
pub const RACES_FAILED_MESSAGE: &str =
    "Не удалось загрузить список соревнований. Попробуйте позже.";

/// Normalized race event summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RaceEvent {
    pub id: Option<String>,
    pub title: String,
    pub logo_url: Option<String>,
    pub start_date: DateTime<Utc>,
    pub city: Option<String>,
}

/// Resolved state of the Races page.
///
/// The page starts out loading and settles in exactly one of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RaceListState {
    /// Upcoming races, soonest first
    Loaded { races: Vec<RaceEvent> },
    /// The request succeeded but no race is upcoming
    Empty { message: String },
    /// The events service could not be reached or parsed
    Failed { message: String },
}

impl RaceListState {
    /// Settle a successful fetch into `Loaded` or `Empty`.
    pub fn from_races(races: Vec<RaceEvent>) -> Self {
        if races.is_empty() {
            Self::Empty {
                message: NO_RACES_MESSAGE.to_string(),
            }
        } else {
            Self::Loaded { races }
        }
    }

    pub fn failed() -> Self {
        Self::Failed {
            message: RACES_FAILED_MESSAGE.to_string(),
        }
    }
}
