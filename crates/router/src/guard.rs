//! Navigation guard decision procedure.
//!
//! Pure: the guard is handed the token and the intent, returns a [`Decision`],
//! and leaves presentation of denials to the caller.

use serde::{Deserialize, Serialize};

use navguard_auth::PrivilegeResolver;
use navguard_core::SessionToken;

use crate::config::{GuardConfig, PrivilegeDenialRedirect};
use crate::route::RouteRequirement;

/// What the routing layer should do with the pending transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
    RedirectToPrevious,
}

/// Why a navigation was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denial {
    /// No session token where authentication is required.
    MissingToken,
    /// Token present, administrator flag missing or unreadable.
    InsufficientPrivilege,
}

impl Denial {
    /// User-facing notification text.
    pub fn message(&self) -> &'static str {
        match self {
            Denial::MissingToken => "Authentication required. Please log in to continue.",
            Denial::InsufficientPrivilege => "Administrator access required.",
        }
    }
}

impl core::fmt::Display for Denial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denial: Option<Denial>,
}

impl Decision {
    pub fn allow() -> Self {
        Self {
            outcome: Outcome::Allow,
            denial: None,
        }
    }

    pub fn redirect(outcome: Outcome) -> Self {
        Self {
            outcome,
            denial: None,
        }
    }

    pub fn deny(outcome: Outcome, denial: Denial) -> Self {
        Self {
            outcome,
            denial: Some(denial),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.outcome == Outcome::Allow
    }

    pub fn is_denied(&self) -> bool {
        self.denial.is_some()
    }
}

/// Everything the guard needs to know about one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationIntent {
    pub requirement: RouteRequirement,
    pub is_login_target: bool,
    /// Path of the route being left, if any.
    pub previous: Option<String>,
}

impl NavigationIntent {
    pub fn to(requirement: RouteRequirement) -> Self {
        Self {
            requirement,
            ..Self::default()
        }
    }

    pub fn login() -> Self {
        Self {
            is_login_target: true,
            ..Self::default()
        }
    }

    pub fn from_previous(mut self, previous: impl Into<String>) -> Self {
        self.previous = Some(previous.into());
        self
    }
}

/// Decides every navigation attempt independently; holds no session state.
pub struct NavigationGuard<R> {
    resolver: R,
    privilege_denial: PrivilegeDenialRedirect,
}

impl<R: PrivilegeResolver> NavigationGuard<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            privilege_denial: PrivilegeDenialRedirect::default(),
        }
    }

    pub fn with_config(resolver: R, config: &GuardConfig) -> Self {
        Self {
            resolver,
            privilege_denial: config.privilege_denial,
        }
    }

    /// Evaluate one navigation attempt. First matching rule wins.
    ///
    /// The resolver is consulted only for admin routes with a token present.
    pub fn decide(&self, intent: &NavigationIntent, token: Option<&SessionToken>) -> Decision {
        let requirement = intent.requirement;

        // Authentication before authorization. An admin route implies
        // authentication even when the declaration forgot to say so.
        let Some(token) = token else {
            if requirement.requires_auth || requirement.requires_admin {
                return Decision::deny(Outcome::RedirectToLogin, Denial::MissingToken);
            }
            return Decision::allow();
        };

        if requirement.requires_admin {
            if self.resolver.is_admin(token) {
                return Decision::allow();
            }
            return Decision::deny(self.privilege_redirect(intent), Denial::InsufficientPrivilege);
        }

        if intent.is_login_target {
            return Decision::redirect(Outcome::RedirectToDashboard);
        }

        Decision::allow()
    }

    fn privilege_redirect(&self, intent: &NavigationIntent) -> Outcome {
        match (self.privilege_denial, &intent.previous) {
            (PrivilegeDenialRedirect::Previous, Some(_)) => Outcome::RedirectToPrevious,
            _ => Outcome::RedirectToDashboard,
        }
    }
}
