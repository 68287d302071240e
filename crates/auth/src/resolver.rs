use std::sync::Arc;

use navguard_core::SessionToken;

use crate::{SessionContext, TokenDecoder, UnverifiedDecoder};

/// Answers whether a token carries administrator privilege.
///
/// Implementations must fail closed: any doubt is `false`.
pub trait PrivilegeResolver: Send + Sync {
    fn is_admin(&self, token: &SessionToken) -> bool;
}

impl<F> PrivilegeResolver for F
where
    F: Fn(&SessionToken) -> bool + Send + Sync,
{
    fn is_admin(&self, token: &SessionToken) -> bool {
        self(token)
    }
}

/// Resolves the administrator flag from the token's claims.
///
/// Stateless: nothing is cached between calls.
#[derive(Clone)]
pub struct ClaimsResolver {
    decoder: Arc<dyn TokenDecoder>,
}

impl ClaimsResolver {
    pub fn new(decoder: impl TokenDecoder + 'static) -> Self {
        Self {
            decoder: Arc::new(decoder),
        }
    }

    /// Resolver that trusts the token payload without verifying it.
    pub fn unverified() -> Self {
        Self::new(UnverifiedDecoder::new())
    }

    /// Read the session's current token and resolve its privilege.
    pub fn resolve_is_admin(&self, session: &SessionContext) -> bool {
        match session.token() {
            Some(token) => self.is_admin(&token),
            None => false,
        }
    }
}

impl Default for ClaimsResolver {
    fn default() -> Self {
        Self::unverified()
    }
}

impl PrivilegeResolver for ClaimsResolver {
    fn is_admin(&self, token: &SessionToken) -> bool {
        match self.decoder.decode(token) {
            Ok(claims) => {
                tracing::debug!(
                    is_admin = claims.is_admin,
                    expires_at = ?claims.expires_at(),
                    "resolved session claims"
                );
                claims.is_admin
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to decode session token; treating as non-admin");
                false
            }
        }
    }
}
