use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by the session token.
///
/// Only the administrator flag drives decisions; everything else the issuer
/// puts in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Administrator privilege. Missing means `false`.
    #[serde(default)]
    pub is_admin: bool,

    /// Expiration (seconds since the Unix epoch), when the issuer sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}
