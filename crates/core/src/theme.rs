//! Light/dark theme preference persisted next to the session token.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::StorageResult;
use crate::storage::{SessionStorage, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// CSS class applied to the document body.
    pub fn body_class(&self) -> &'static str {
        match self {
            Theme::Light => "",
            Theme::Dark => "dark-mode",
        }
    }
}

impl core::fmt::Display for Theme {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme preference bound to a storage backend.
///
/// Every change is written through immediately.
pub struct ThemePreference {
    storage: Arc<dyn SessionStorage>,
    current: Theme,
}

impl ThemePreference {
    /// Load the saved theme, falling back to [`Theme::Light`].
    pub fn load(storage: Arc<dyn SessionStorage>) -> Self {
        let current = match storage.get(THEME_KEY) {
            Some(saved) => Theme::parse(&saved).unwrap_or_else(|| {
                tracing::debug!(saved = %saved, "unknown stored theme; using default");
                Theme::default()
            }),
            None => Theme::default(),
        };
        Self { storage, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn set(&mut self, theme: Theme) -> StorageResult<()> {
        self.storage.set(THEME_KEY, theme.as_str())?;
        self.current = theme;
        tracing::debug!(theme = %theme, "theme updated");
        Ok(())
    }

    pub fn toggle(&mut self) -> StorageResult<Theme> {
        let next = self.current.toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn defaults_to_light_when_missing_or_unknown() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::new());
        assert_eq!(ThemePreference::load(storage).current(), Theme::Light);

        let storage: Arc<dyn SessionStorage> =
            Arc::new(MemoryStorage::with_entries([(THEME_KEY, "solarized")]));
        assert_eq!(ThemePreference::load(storage).current(), Theme::Light);
    }

    #[test]
    fn toggle_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let mut pref = ThemePreference::load(storage.clone());

        assert_eq!(pref.toggle().unwrap(), Theme::Dark);
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(pref.current().body_class(), "dark-mode");

        // A fresh load sees the persisted value.
        let reloaded = ThemePreference::load(storage.clone());
        assert_eq!(reloaded.current(), Theme::Dark);

        assert_eq!(pref.toggle().unwrap(), Theme::Light);
        assert_eq!(pref.current().body_class(), "");
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
