//! Storage layer (local JSON records).

pub mod local_store;

pub use local_store::{LocalStore, StoreError};

/// Record keys as constants.
pub mod keys {
    /// Ordered list of logged runs
    pub const RUN_LOGS: &str = "run_logs";
    /// The user profile singleton
    pub const USER_PROFILE: &str = "user_profile";
}
