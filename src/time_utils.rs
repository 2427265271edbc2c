// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Today's calendar date in UTC, the default date of a new run.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Run identifier derived from the creation timestamp (Unix milliseconds).
pub fn timestamp_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

/// Parse the loosely formatted dates third-party APIs return.
///
/// Accepts RFC3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and
/// a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_loose_utc(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
