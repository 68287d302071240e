use serde::{Deserialize, Serialize};

use crate::storage::{SessionStorage, TOKEN_KEY};

/// Opaque bearer credential proving an authenticated session.
///
/// Never empty: an empty stored string is treated as "no session".
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token. Returns `None` for empty or whitespace-only input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Read the current token from storage.
    pub fn read(storage: &dyn SessionStorage) -> Option<Self> {
        storage.get(TOKEN_KEY).and_then(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the HTTP `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Tokens are credentials; keep them out of logs.
impl core::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SessionToken(<{} bytes>)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn empty_token_counts_as_absent() {
        assert!(SessionToken::new("").is_none());
        assert!(SessionToken::new("   ").is_none());

        let storage = MemoryStorage::with_entries([(TOKEN_KEY, "")]);
        assert!(SessionToken::read(&storage).is_none());
    }

    #[test]
    fn read_reflects_current_storage() {
        let storage = MemoryStorage::new();
        assert!(SessionToken::read(&storage).is_none());

        storage.set(TOKEN_KEY, "first").unwrap();
        assert_eq!(SessionToken::read(&storage).unwrap().as_str(), "first");

        storage.set(TOKEN_KEY, "second").unwrap();
        assert_eq!(SessionToken::read(&storage).unwrap().as_str(), "second");
    }

    #[test]
    fn bearer_header_and_redacted_debug() {
        let token = SessionToken::new("abc.def.ghi").unwrap();
        assert_eq!(token.bearer(), "Bearer abc.def.ghi");
        assert!(!format!("{token:?}").contains("abc"));
    }
}
