// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The user profile singleton, persisted to the `user_profile` record.

use crate::db::{keys, LocalStore, StoreError};
use crate::models::UserProfile;
use tokio::sync::RwLock;

/// Profile state owned by the application.
pub struct ProfileState {
    store: LocalStore,
    profile: RwLock<UserProfile>,
}

impl ProfileState {
    /// Load the stored profile, or the default one if none is stored.
    pub fn load(store: LocalStore) -> Result<Self, StoreError> {
        let profile: UserProfile = store.load(keys::USER_PROFILE)?.unwrap_or_default();

        Ok(Self {
            store,
            profile: RwLock::new(profile),
        })
    }

    pub async fn get(&self) -> UserProfile {
        self.profile.read().await.clone()
    }

    /// Replace the whole profile and persist it.
    pub async fn set(&self, profile: UserProfile) -> Result<(), StoreError> {
        let mut current = self.profile.write().await;
        self.store.save(keys::USER_PROFILE, &profile)?;
        *current = profile;

        tracing::info!("Profile updated");
        Ok(())
    }
}
