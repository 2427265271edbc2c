// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory run list persisted to the `run_logs` record.

use crate::db::{keys, LocalStore, StoreError};
use crate::models::stats::{history_view, DashboardStats};
use crate::models::RunLog;
use tokio::sync::RwLock;

/// Append-only, insertion-ordered run repository.
///
/// The full list is written to the store on every append while the write
/// lock is held, so the stored order always matches the in-memory order.
pub struct RunRepository {
    store: LocalStore,
    runs: RwLock<Vec<RunLog>>,
}

impl RunRepository {
    /// Load the stored run list (empty if nothing is stored yet).
    pub fn load(store: LocalStore) -> Result<Self, StoreError> {
        let runs: Vec<RunLog> = store.load(keys::RUN_LOGS)?.unwrap_or_default();
        tracing::info!(count = runs.len(), "Loaded run logs");

        Ok(Self {
            store,
            runs: RwLock::new(runs),
        })
    }

    /// Add a run at the end of the list and persist the list.
    ///
    /// No de-duplication. If persisting fails the run is not kept.
    pub async fn append(&self, run: RunLog) -> Result<(), StoreError> {
        let mut runs = self.runs.write().await;
        runs.push(run);

        if let Err(e) = self.store.save(keys::RUN_LOGS, runs.as_slice()) {
            runs.pop();
            return Err(e);
        }

        tracing::info!(count = runs.len(), "Run appended");
        Ok(())
    }

    /// Snapshot in insertion order.
    pub async fn list(&self) -> Vec<RunLog> {
        self.runs.read().await.clone()
    }

    /// All runs, newest date first.
    pub async fn history(&self) -> Vec<RunLog> {
        history_view(&self.runs.read().await)
    }

    pub async fn dashboard(&self) -> DashboardStats {
        DashboardStats::from_runs(&self.runs.read().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_run(id: &str, distance: f64) -> RunLog {
        RunLog {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            distance,
            duration: 30.0,
            pace: 30.0 / distance,
            notes: String::new(),
            image_url: None,
            ai_feedback: None,
        }
    }

    #[tokio::test]
    async fn test_append_preserves_insertion_order() {
        let repo = RunRepository::load(LocalStore::in_memory()).unwrap();
        let ids = ["3", "1", "2", "1"];

        for id in ids {
            repo.append(make_run(id, 5.0)).await.unwrap();
        }

        let listed: Vec<String> = repo.list().await.into_iter().map(|r| r.id).collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn test_append_persists_full_list() {
        let store = LocalStore::in_memory();
        let repo = RunRepository::load(store.clone()).unwrap();

        repo.append(make_run("a", 5.0)).await.unwrap();
        repo.append(make_run("b", 10.0)).await.unwrap();

        let stored: Vec<RunLog> = store.load(keys::RUN_LOGS).unwrap().unwrap();
        assert_eq!(stored, repo.list().await);

        // A fresh repository over the same store sees the same runs.
        let reloaded = RunRepository::load(store).unwrap();
        assert_eq!(reloaded.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_run_list_fails_to_load() {
        let store = LocalStore::in_memory();
        store.save_raw(keys::RUN_LOGS, r#"[{"id": 1}]"#).unwrap();

        let err = RunRepository::load(store).err().unwrap();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_dashboard_aggregates() {
        let repo = RunRepository::load(LocalStore::in_memory()).unwrap();
        for (id, distance) in [("1", 5.0), ("2", 3.2), ("3", 10.0)] {
            repo.append(make_run(id, distance)).await.unwrap();
        }

        let stats = repo.dashboard().await;
        assert!((stats.total_distance - 18.2).abs() < 1e-9);
        assert_eq!(stats.run_count, 3);
    }
}
