// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON key-value store backed by one file per key.
//!
//! Each record is serialized verbatim on every save and fully replaces
//! the previous value. There is no versioning and no migration: a record
//! that no longer parses is reported as [`StoreError::Corrupt`].

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Local key-value store client.
#[derive(Clone)]
pub struct LocalStore {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    /// `<dir>/<key>.json`
    Dir(PathBuf),
    /// Serialized records kept in memory (tests).
    Memory(Arc<Mutex<HashMap<String, String>>>),
}

impl LocalStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        tracing::info!(path = %dir.display(), "Opened local store");

        Ok(Self {
            backend: Backend::Dir(dir),
        })
    }

    /// Create an empty in-memory store for testing.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(Mutex::new(HashMap::new()))),
        }
    }

    /// Load the record stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let raw = match &self.backend {
            Backend::Dir(dir) => {
                let path = record_path(dir, key);
                match fs::read_to_string(&path) {
                    Ok(raw) => raw,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
                    Err(source) => return Err(StoreError::Io { path, source }),
                }
            }
            Backend::Memory(map) => {
                let map = map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                match map.get(key) {
                    Some(raw) => raw.clone(),
                    None => return Ok(None),
                }
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    /// Serialize `value` and store it under `key`, replacing any prior value.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;

        match &self.backend {
            Backend::Dir(dir) => {
                // Write a sibling file and rename it so readers never see a partial record.
                let path = record_path(dir, key);
                let tmp = dir.join(format!("{key}.json.tmp"));
                fs::write(&tmp, raw.as_bytes()).map_err(|source| StoreError::Io {
                    path: tmp.clone(),
                    source,
                })?;
                fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })?;
            }
            Backend::Memory(map) => {
                map.lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .insert(key.to_string(), raw);
            }
        }

        tracing::debug!(key, "Record saved");
        Ok(())
    }

    /// Store a raw, unvalidated string under `key` (tests only).
    #[doc(hidden)]
    pub fn save_raw(&self, key: &str, raw: &str) -> Result<(), StoreError> {
        match &self.backend {
            Backend::Dir(dir) => {
                let path = record_path(dir, key);
                fs::write(&path, raw).map_err(|source| StoreError::Io { path, source })
            }
            Backend::Memory(map) => {
                map.lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .insert(key.to_string(), raw.to_string());
                Ok(())
            }
        }
    }
}

fn record_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Stored record '{key}' is corrupt or incompatible: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize record '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
