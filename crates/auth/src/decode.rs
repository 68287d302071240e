//! Token decoding strategies.
//!
//! The client cannot be the authority on a token's validity: the server checks
//! every API call. [`UnverifiedDecoder`] therefore only checks structure, while
//! [`Hs256Decoder`] is available for hosts that share the signing secret.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use navguard_core::SessionToken;

use crate::Claims;

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("malformed token: {0}")]
    Malformed(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for ClaimsError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => ClaimsError::Expired,
            ErrorKind::InvalidSignature => ClaimsError::InvalidSignature,
            _ => ClaimsError::Malformed(err),
        }
    }
}

/// Turns a stored token into [`Claims`].
pub trait TokenDecoder: Send + Sync {
    fn decode(&self, token: &SessionToken) -> Result<Claims, ClaimsError>;
}

/// Structural JWT decoding, no signature or expiry checks.
pub struct UnverifiedDecoder {
    key: DecodingKey,
    validation: Validation,
}

impl UnverifiedDecoder {
    pub fn new() -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(&[]),
            validation,
        }
    }
}

impl Default for UnverifiedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenDecoder for UnverifiedDecoder {
    fn decode(&self, token: &SessionToken) -> Result<Claims, ClaimsError> {
        let data = jsonwebtoken::decode::<Claims>(token.as_str(), &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

/// HS256-verified decoding. Rejects bad signatures and, when `exp` is
/// present, expired tokens.
pub struct Hs256Decoder {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256Decoder {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_aud = false;

        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }
}

impl TokenDecoder for Hs256Decoder {
    fn decode(&self, token: &SessionToken) -> Result<Claims, ClaimsError> {
        let data = jsonwebtoken::decode::<Claims>(token.as_str(), &self.key, &self.validation)?;
        Ok(data.claims)
    }
}
