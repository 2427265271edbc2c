// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes, one group per page of the client.

use crate::error::{AppError, Result};
use crate::models::navigation::nav_items;
use crate::models::{
    DashboardStats, NavItem, RaceListState, Route, RunAnalysis, RunDraft, RunLog, UserProfile,
    Weather,
};
use crate::services::photo::{validate_data_url, Photo};
use crate::time_utils::{timestamp_id, today_utc};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Body limit for every API route. Large enough for a maximal photo as a
/// base64 data URI inside JSON, so oversized photos reach the size gate
/// and get its message.
pub const API_BODY_LIMIT: usize = 16 * 1024 * 1024;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/runs", get(get_history).post(create_run))
        .route("/api/runs/analyze", post(analyze_photo))
        .route("/api/photos", post(upload_photo))
        .route("/api/profile", get(get_profile).put(save_profile))
        .route("/api/races", get(get_races))
        .route("/api/weather", get(get_weather))
        .route("/api/navigation", get(get_navigation))
        .layer(DefaultBodyLimit::max(API_BODY_LIMIT))
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardResponse {
    pub profile: UserProfile,
    #[serde(flatten)]
    pub stats: DashboardStats,
    /// Coaching tip; only requested once at least one run exists
    pub advice: Option<String>,
    /// Omitted when the weather service is unavailable
    pub weather: Option<Weather>,
}

/// Aggregates, recent runs, chart, advice and weather in one response.
async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let profile = state.profile.get().await;
    let stats = state.runs.dashboard().await;

    tracing::debug!(
        run_count = stats.run_count,
        total_distance = stats.total_distance,
        "Building dashboard"
    );

    // Advice and weather are independent; neither waits on the other.
    let advice = async {
        if stats.run_count > 0 {
            Some(
                state
                    .gemini
                    .weekly_advice(stats.total_distance, stats.run_count)
                    .await,
            )
        } else {
            None
        }
    };
    let (advice, weather) = tokio::join!(advice, state.weather.current());

    Json(DashboardResponse {
        profile,
        stats,
        advice,
        weather,
    })
}

// ─── Runs ────────────────────────────────────────────────────

/// All runs, newest date first.
async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<RunLog>> {
    Json(state.runs.history().await)
}

/// Submit the Add-Run form.
async fn create_run(
    State(state): State<Arc<AppState>>,
    Json(mut draft): Json<RunDraft>,
) -> Result<(StatusCode, Json<RunLog>)> {
    draft.validate()?;
    draft.image_url = validate_data_url(draft.image_url.take())?;

    let run = draft
        .into_run(timestamp_id(chrono::Utc::now()), today_utc())
        .ok_or_else(|| AppError::BadRequest("distance and duration are required".to_string()))?;

    // A non-finite pace would be stored as null and make the run list unreadable.
    if !run.pace.is_finite() {
        return Err(AppError::BadRequest(
            "distance and duration give no finite pace".to_string(),
        ));
    }

    tracing::info!(
        run_id = %run.id,
        distance = run.distance,
        duration = run.duration,
        "Logging run"
    );

    state.runs.append(run.clone()).await?;
    Ok((StatusCode::CREATED, Json(run)))
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    /// Photo as a data URI
    image: String,
    /// Current form state to merge the analysis into
    #[serde(default)]
    draft: RunDraft,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AnalyzeResponse {
    /// The form with the photo attached and the analysis merged in
    pub draft: RunDraft,
    pub analysis: RunAnalysis,
}

/// Attach a photo to the Add-Run form and fill it in from AI analysis.
async fn analyze_photo(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    let photo = Photo::from_data_url(&request.image)?;

    tracing::debug!(bytes = photo.bytes.len(), mime = %photo.mime, "Analyzing run photo");
    let analysis = state.gemini.analyze_run_image(&photo.bytes).await;

    let mut draft = request.draft;
    draft.image_url = Some(request.image);
    draft.apply_analysis(&analysis);

    Ok(Json(AnalyzeResponse { draft, analysis }))
}

// ─── Photos ──────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PhotoResponse {
    pub data_url: String,
}

/// Accept a selected image file (raw body) and return it as a data URI.
async fn upload_photo(headers: HeaderMap, body: Bytes) -> Result<Json<PhotoResponse>> {
    let mime = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let photo = Photo::from_upload(body.to_vec(), mime).inspect_err(|e| {
        tracing::info!(error = %e, "Photo rejected");
    })?;

    Ok(Json(PhotoResponse {
        data_url: photo.to_data_url(),
    }))
}

// ─── Profile ─────────────────────────────────────────────────

async fn get_profile(State(state): State<Arc<AppState>>) -> Json<UserProfile> {
    Json(state.profile.get().await)
}

/// Replace the profile.
async fn save_profile(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UserProfile>> {
    profile.validate()?;

    let profile = UserProfile {
        name: profile.name.trim().to_string(),
        photo_url: validate_data_url(profile.photo_url)?,
    };

    state.profile.set(profile.clone()).await?;
    Ok(Json(profile))
}

// ─── Races ───────────────────────────────────────────────────

/// Upcoming races. A failed fetch is reported as the `failed` state.
async fn get_races(State(state): State<Arc<AppState>>) -> (StatusCode, Json<RaceListState>) {
    match state.events.upcoming().await {
        Ok(races) => (StatusCode::OK, Json(RaceListState::from_races(races))),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch races");
            (StatusCode::BAD_GATEWAY, Json(RaceListState::failed()))
        }
    }
}

// ─── Weather ─────────────────────────────────────────────────

/// Current weather, or 204 when unavailable.
async fn get_weather(State(state): State<Arc<AppState>>) -> Response {
    match state.weather.current().await {
        Some(weather) => Json(weather).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

// ─── Navigation ──────────────────────────────────────────────

#[derive(Deserialize)]
struct NavigationQuery {
    /// Current client location, e.g. `/races`
    #[serde(default)]
    path: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NavigationResponse {
    /// `None` for paths that match no page
    pub route: Option<Route>,
    pub items: Vec<NavItem>,
}

async fn get_navigation(Query(params): Query<NavigationQuery>) -> Json<NavigationResponse> {
    let route = Route::from_path(&params.path);
    Json(NavigationResponse {
        route,
        items: nav_items(route),
    })
}
