//! String-keyed client storage (the `localStorage` boundary).

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StorageError, StorageResult};

/// Storage key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "theme";

/// Process-wide string storage.
///
/// Implementations must make a single `get` an atomic read of the current
/// value; callers re-read on every check instead of caching.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove an entry. Removing a missing key is not an error.
    fn remove(&self, key: &str);
}

/// In-memory storage backend (tests, CLI, non-browser hosts).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a storage pre-seeded with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey);
        }
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(TOKEN_KEY), None);

        storage.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc"));

        storage.remove(TOKEN_KEY);
        assert_eq!(storage.get(TOKEN_KEY), None);

        // Removing twice is fine.
        storage.remove(TOKEN_KEY);
    }

    #[test]
    fn empty_key_is_rejected() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.set("", "x"), Err(StorageError::InvalidKey));
    }

    #[test]
    fn seeded_entries_are_visible() {
        let storage = MemoryStorage::with_entries([(TOKEN_KEY, "t"), (THEME_KEY, "dark")]);
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("t"));
    }
}
