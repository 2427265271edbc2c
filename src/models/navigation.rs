// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client routes and the bottom navigation bar.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A page of the client application, addressed by its fragment path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Route {
    Dashboard,
    AddRun,
    History,
    Races,
    Profile,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Dashboard,
        Route::AddRun,
        Route::History,
        Route::Races,
        Route::Profile,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::AddRun => "/add",
            Route::History => "/history",
            Route::Races => "/races",
            Route::Profile => "/profile",
        }
    }

    /// Resolve a location such as `#/races` or `/history/`.
    ///
    /// Only the path itself is significant; unknown paths yield `None`.
    pub fn from_path(raw: &str) -> Option<Route> {
        let path = raw.trim().trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };

        Route::ALL.into_iter().find(|r| r.path() == path)
    }
}

/// One entry of the bottom navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NavItem {
    pub route: Route,
    pub path: &'static str,
    pub label: &'static str,
    /// Highlighted when it matches the current route
    pub active: bool,
}

/// Pages linked from the navigation bar, in display order.
const NAV_BAR: [(Route, &str); 3] = [
    (Route::Dashboard, "Обзор"),
    (Route::Races, "Афиша"),
    (Route::History, "История"),
];

/// Build the navigation bar for the page at `current`.
pub fn nav_items(current: Option<Route>) -> Vec<NavItem> {
    NAV_BAR
        .iter()
        .map(|&(route, label)| NavItem {
            route,
            path: route.path(),
            label,
            active: current == Some(route),
        })
        .collect()
}
