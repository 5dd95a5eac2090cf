//! services/encyclopedia/src/adapters/token_store.rs
//!
//! Persistent storage for the session's bearer token.
//! It implements the `TokenStore` port from the `core` crate as a small JSON
//! key-value file, mirroring the browser's local storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use hadith_core::ports::{PortError, PortResult, TokenStore};
use tracing::warn;

pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// A `TokenStore` backed by a JSON object on disk.
pub struct FileTokenStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileTokenStore {
    /// Opens the store, reading any existing entries. An unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring corrupt storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Applies `change` to a copy of the entries and swaps it in only once it is on disk,
    /// so memory never holds a value the file does not.
    fn update<F>(&self, change: F) -> PortResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let mut next = entries.clone();
        change(&mut next);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PortError::Unexpected(e.to_string()))?;
            }
        }
        let json =
            serde_json::to_string_pretty(&next).map_err(|e| PortError::Unexpected(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| PortError::Unexpected(e.to_string()))?;

        *entries = next;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(AUTH_TOKEN_KEY)
            .cloned()
    }

    fn set_token(&self, token: &str) -> PortResult<()> {
        self.update(|entries| {
            entries.insert(AUTH_TOKEN_KEY.to_string(), token.to_string());
        })
    }

    fn clear_token(&self) -> PortResult<()> {
        self.update(|entries| {
            entries.remove(AUTH_TOKEN_KEY);
        })
    }
}

/// A non-persistent `TokenStore` for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_token(&self, token: &str) -> PortResult<()> {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> PortResult<()> {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
