// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod analysis;
pub mod navigation;
pub mod profile;
pub mod race;
pub mod run;
pub mod stats;
pub mod weather;

pub use analysis::RunAnalysis;
pub use navigation::{NavItem, Route};
pub use profile::UserProfile;
pub use race::{RaceEvent, RaceListState};
pub use run::{RunDraft, RunLog};
pub use stats::DashboardStats;
pub use weather::{Weather, WeatherIcon};
