// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run log model for storage and API.

use crate::models::RunAnalysis;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// One logged run, as stored in the `run_logs` record.
///
/// There is no edit path: `pace` is derived once when the run is created
/// and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunLog {
    /// Creation timestamp in Unix milliseconds
    pub id: String,
    /// Calendar date of the run
    pub date: NaiveDate,
    /// Distance in kilometers
    pub distance: f64,
    /// Duration in minutes
    pub duration: f64,
    /// Minutes per kilometer
    pub pace: f64,
    #[serde(default)]
    pub notes: String,
    /// Attached photo as a data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Comment from photo analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_feedback: Option<String>,
}

/// Minutes per kilometer.
pub fn compute_pace(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// State of the Add-Run form before submission.
///
/// Every field is optional while the user is still filling it in; photo
/// analysis may fill distance, duration and notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunDraft {
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default)]
    pub distance: Option<f64>,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default)]
    pub duration: Option<f64>,
    /// Defaults to today on submission
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ai_feedback: Option<String>,
}

impl RunDraft {
    /// Merge a photo analysis into the form.
    ///
    /// Present values replace distance, duration and feedback; notes are
    /// appended on a new line. Absent (or zero/empty) values leave the
    /// form untouched.
    pub fn apply_analysis(&mut self, analysis: &RunAnalysis) {
        if let Some(distance) = analysis.distance.filter(|d| *d > 0.0) {
            self.distance = Some(distance);
        }
        if let Some(duration) = analysis.duration.filter(|d| *d > 0.0) {
            self.duration = Some(duration);
        }
        if let Some(notes) = analysis.notes.as_deref().filter(|n| !n.is_empty()) {
            if self.notes.is_empty() {
                self.notes = notes.to_string();
            } else {
                self.notes = format!("{}\n{}", self.notes, notes);
            }
        }
        if let Some(feedback) = analysis.feedback.as_deref().filter(|f| !f.is_empty()) {
            self.ai_feedback = Some(feedback.to_string());
        }
    }

    /// Build the run to store.
    ///
    /// Returns `None` when distance or duration is missing; submitting
    /// such a form does nothing.
    pub fn into_run(self, id: String, today: NaiveDate) -> Option<RunLog> {
        let distance = self.distance?;
        let duration = self.duration?;

        Some(RunLog {
            id,
            date: self.date.unwrap_or(today),
            distance,
            duration,
            pace: compute_pace(distance, duration),
            notes: self.notes,
            image_url: self.image_url.filter(|url| !url.is_empty()),
            ai_feedback: self.ai_feedback.filter(|f| !f.is_empty()),
        })
    }
}
