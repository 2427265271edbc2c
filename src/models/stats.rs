// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard aggregates derived from the run list.
//!
//! Nothing here is stored: every view is recomputed from the
//! insertion-ordered run list on request, which is never reordered.

use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::RunLog;

/// Number of runs in the "recent" list.
pub const RECENT_RUNS: usize = 3;
/// Number of runs plotted on the progress chart.
pub const CHART_RUNS: usize = 7;

/// One point on the distance chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub distance: f64,
}

/// Aggregates shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardStats {
    // ─── Totals ──────────────────────────────────────────────────
    /// Total distance across all runs (km)
    pub total_distance: f64,
    /// Total time across all runs (minutes)
    pub total_duration: f64,
    pub run_count: usize,

    // ─── Lists ───────────────────────────────────────────────────
    /// Most recently added runs, newest first
    pub recent_runs: Vec<RunLog>,
    /// Last runs by date, oldest first
    pub chart: Vec<ChartPoint>,
}

impl DashboardStats {
    pub fn from_runs(runs: &[RunLog]) -> Self {
        let total_distance = runs.iter().map(|r| r.distance).sum();
        let total_duration = runs.iter().map(|r| r.duration).sum();

        Self {
            total_distance,
            total_duration,
            run_count: runs.len(),
            recent_runs: runs.iter().rev().take(RECENT_RUNS).cloned().collect(),
            chart: chart_points(runs),
        }
    }
}

/// Up to [`CHART_RUNS`] latest runs by date, in ascending date order.
pub fn chart_points(runs: &[RunLog]) -> Vec<ChartPoint> {
    let mut by_date: Vec<&RunLog> = runs.iter().collect();
    by_date.sort_by_key(|r| r.date);

    let skip = by_date.len().saturating_sub(CHART_RUNS);
    by_date
        .into_iter()
        .skip(skip)
        .map(|r| ChartPoint {
            date: r.date,
            distance: r.distance,
        })
        .collect()
}

/// All runs, newest date first. Runs on the same date keep insertion order.
pub fn history_view(runs: &[RunLog]) -> Vec<RunLog> {
    let mut sorted = runs.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_run(id: &str, date: &str, distance: f64) -> RunLog {
        RunLog {
            id: id.to_string(),
            date: date.parse().unwrap(),
            distance,
            duration: distance * 6.0,
            pace: 6.0,
            notes: String::new(),
            image_url: None,
            ai_feedback: None,
        }
    }

    #[test]
    fn test_totals() {
        let runs = vec![
            make_run("1", "2026-10-01", 5.0),
            make_run("2", "2026-10-03", 3.2),
            make_run("3", "2026-10-05", 10.0),
        ];

        let stats = DashboardStats::from_runs(&runs);

        assert!((stats.total_distance - 18.2).abs() < 1e-9);
        assert!((stats.total_duration - 109.2).abs() < 1e-9);
        assert_eq!(stats.run_count, 3);
    }

    #[test]
    fn test_empty_dashboard() {
        let stats = DashboardStats::from_runs(&[]);
        assert_eq!(stats.run_count, 0);
        assert_eq!(stats.total_distance, 0.0);
        assert!(stats.recent_runs.is_empty());
        assert!(stats.chart.is_empty());
    }

    #[test]
    fn test_recent_runs_are_reverse_insertion() {
        // Inserted out of date order on purpose: recency follows insertion.
        let runs = vec![
            make_run("1", "2026-10-05", 1.0),
            make_run("2", "2026-10-01", 2.0),
            make_run("3", "2026-10-09", 3.0),
            make_run("4", "2026-09-30", 4.0),
        ];

        let stats = DashboardStats::from_runs(&runs);
        let ids: Vec<&str> = stats.recent_runs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "2"]);
    }

    #[test]
    fn test_chart_keeps_last_seven_by_date() {
        let runs: Vec<RunLog> = (1..=9)
            .rev()
            .map(|day| make_run(&day.to_string(), &format!("2026-10-0{day}"), day as f64))
            .collect();

        let chart = chart_points(&runs);

        assert_eq!(chart.len(), 7);
        assert_eq!(chart[0].date.to_string(), "2026-10-03");
        assert_eq!(chart[6].date.to_string(), "2026-10-09");
        assert!(chart.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_history_sorted_descending_and_stable() {
        let runs = vec![
            make_run("a", "2026-10-02", 1.0),
            make_run("b", "2026-10-07", 1.0),
            make_run("c", "2026-10-02", 1.0),
        ];

        let history = history_view(&runs);
        let ids: Vec<&str> = history.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);

        // The source list is untouched.
        assert_eq!(runs[0].id, "a");
    }
}
