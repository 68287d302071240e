use std::sync::Arc;

use navguard_core::{SessionStorage, SessionToken};

/// Session context injected into everything that needs the current token.
///
/// Holds no token itself: each accessor reads storage at the instant of the
/// call, so login/logout performed elsewhere is visible immediately.
#[derive(Clone)]
pub struct SessionContext {
    storage: Arc<dyn SessionStorage>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn token(&self) -> Option<SessionToken> {
        SessionToken::read(self.storage.as_ref())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// `Authorization` header value for outgoing API calls.
    pub fn authorization_header(&self) -> Option<String> {
        self.token().map(|t| t.bearer())
    }
}

impl core::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navguard_core::{MemoryStorage, TOKEN_KEY};

    #[test]
    fn header_follows_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionContext::new(storage.clone());

        assert!(!session.is_authenticated());
        assert_eq!(session.authorization_header(), None);

        storage.set(TOKEN_KEY, "t0k3n").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.authorization_header().as_deref(), Some("Bearer t0k3n"));

        storage.remove(TOKEN_KEY);
        assert!(!session.is_authenticated());
    }
}
