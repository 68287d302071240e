//! Guard configuration (environment-driven).

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_LOGIN_PATH: &str = "NAVGUARD_LOGIN_PATH";
pub const ENV_DASHBOARD_PATH: &str = "NAVGUARD_DASHBOARD_PATH";
pub const ENV_PRIVILEGE_DENIAL: &str = "NAVGUARD_PRIVILEGE_DENIAL";

/// Where a session lacking administrator privilege is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivilegeDenialRedirect {
    #[default]
    Dashboard,
    /// Back to the route the user came from; dashboard when there is none.
    Previous,
}

impl core::str::FromStr for PrivilegeDenialRedirect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "previous" => Ok(Self::Previous),
            other => Err(ConfigError::InvalidPrivilegeDenial(other.to_string())),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an absolute path (got '{value}')")]
    InvalidPath { var: &'static str, value: String },

    #[error("unknown privilege denial redirect '{0}' (expected 'dashboard' or 'previous')")]
    InvalidPrivilegeDenial(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    pub login_path: String,
    pub dashboard_path: String,
    #[serde(default)]
    pub privilege_denial: PrivilegeDenialRedirect,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            dashboard_path: "/dashboard".to_string(),
            privilege_denial: PrivilegeDenialRedirect::Dashboard,
        }
    }
}

impl GuardConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_LOGIN_PATH) {
            config.login_path = absolute_path(ENV_LOGIN_PATH, path)?;
        }
        if let Some(path) = lookup(ENV_DASHBOARD_PATH) {
            config.dashboard_path = absolute_path(ENV_DASHBOARD_PATH, path)?;
        }
        if let Some(mode) = lookup(ENV_PRIVILEGE_DENIAL) {
            config.privilege_denial = mode.parse()?;
        }

        Ok(config)
    }
}

fn absolute_path(var: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidPath { var, value })
    }
}
