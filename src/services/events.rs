// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upcoming race events from the recommended-events API.
//!
//! Handles:
//! - Array or wrapped-array responses
//! - Inconsistent field naming across event payloads
//! - Dropping past events and ordering by start date

use crate::config::Config;
use crate::models::race::{RaceEvent, UNTITLED_EVENT};
use crate::services::http::{build_client, check_response_json, ClientError};
use crate::time_utils::parse_loose_utc;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Keys under which a wrapped response may carry the event array.
const WRAPPER_KEYS: [&str; 3] = ["events", "Items", "items"];

/// Canonical event fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventField {
    Id,
    Title,
    StartDate,
    LogoUrl,
    City,
}

/// Candidate upstream keys per canonical field, tried in order.
/// Dotted keys address nested objects.
const FIELD_KEYS: [(EventField, &[&str]); 5] = [
    (EventField::Id, &["Id", "id"]),
    (EventField::Title, &["Title", "Name", "name", "title"]),
    (EventField::StartDate, &["DateStart", "startDate", "date"]),
    (EventField::LogoUrl, &["Logo.Url", "logoUrl"]),
    (EventField::City, &["City.Name", "city"]),
];

/// Events API client.
#[derive(Clone)]
pub struct EventsClient {
    http: reqwest::Client,
    url: String,
    language: String,
    page_size: u32,
}

impl EventsClient {
    pub fn new(url: String, language: String, page_size: u32) -> Self {
        Self {
            http: build_client(),
            url,
            language,
            page_size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.events_api_url.clone(),
            config.events_language.clone(),
            config.events_page_size,
        )
    }

    /// Fetch events starting at or after the current time, soonest first.
    pub async fn upcoming(&self) -> Result<Vec<RaceEvent>, ClientError> {
        self.upcoming_at(Utc::now()).await
    }

    /// Fetch events starting at or after `now`, soonest first.
    pub async fn upcoming_at(&self, now: DateTime<Utc>) -> Result<Vec<RaceEvent>, ClientError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("Language", self.language.clone()),
                ("Size", self.page_size.to_string()),
            ])
            .send()
            .await?;

        let body: Value = check_response_json(response).await?;
        let races = upcoming_events(&body, now);

        tracing::debug!(count = races.len(), "Fetched upcoming races");
        Ok(races)
    }
}

/// Normalize a raw response body into upcoming events, soonest first.
pub fn upcoming_events(body: &Value, now: DateTime<Utc>) -> Vec<RaceEvent> {
    let mut races: Vec<RaceEvent> = event_array(body)
        .iter()
        .filter_map(normalize_event)
        .filter(|race| race.start_date >= now)
        .collect();

    races.sort_by_key(|race| race.start_date);
    races
}

/// The event array of a bare or wrapped response. Anything else is empty.
fn event_array(body: &Value) -> &[Value] {
    if let Some(events) = body.as_array() {
        return events;
    }

    WRAPPER_KEYS
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Normalize one upstream event. Events without a parseable start date are dropped.
fn normalize_event(event: &Value) -> Option<RaceEvent> {
    let start_date = lookup(event, EventField::StartDate)
        .and_then(Value::as_str)
        .and_then(parse_loose_utc)?;

    Some(RaceEvent {
        id: lookup(event, EventField::Id).and_then(scalar_string),
        title: lookup(event, EventField::Title)
            .and_then(scalar_string)
            .unwrap_or_else(|| UNTITLED_EVENT.to_string()),
        logo_url: lookup(event, EventField::LogoUrl).and_then(scalar_string),
        start_date,
        city: lookup(event, EventField::City).and_then(scalar_string),
    })
}

/// First present value among the candidate keys of `field`.
fn lookup(event: &Value, field: EventField) -> Option<&Value> {
    let (_, candidates) = FIELD_KEYS.iter().find(|(f, _)| *f == field)?;

    candidates
        .iter()
        .filter_map(|key| key.split('.').try_fold(event, |value, part| value.get(part)))
        .find(|value| is_present(value))
}

/// Null, empty strings and `false` count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
