// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Result of AI photo analysis.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Feedback returned when the photo could not be analyzed.
pub const ANALYSIS_FALLBACK_FEEDBACK: &str =
    "Не удалось проанализировать фото, но пробежка — это всегда круто!";

/// Structured data extracted from a run photo.
///
/// Any field may be absent when it cannot be inferred from the image.
/// Transient: merged into the Add-Run draft, never stored on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunAnalysis {
    /// Distance in km, if visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Duration in minutes, if visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Short description of the surroundings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Motivational comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl RunAnalysis {
    /// The analysis reported when the service call fails.
    pub fn fallback() -> Self {
        Self {
            feedback: Some(ANALYSIS_FALLBACK_FEEDBACK.to_string()),
            ..Default::default()
        }
    }
}
