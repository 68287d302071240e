//! Caller-side application of guard decisions.
//!
//! The navigator is what the routing layer's pre-navigation hook calls: it
//! reads the session fresh, asks the guard, shows the denial (exactly once)
//! and tells the router where to go instead.

use serde::Serialize;

use navguard_auth::{PrivilegeResolver, SessionContext};

use crate::config::GuardConfig;
use crate::guard::{Decision, NavigationGuard, NavigationIntent, Outcome};
use crate::notify::Notifier;
use crate::route::{RouteTable, normalize};

/// Result of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Concrete path requested (after redirect records).
    pub target: String,
    /// Name of the matched route, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    pub decision: Decision,
    /// Where the router should actually go.
    pub destination: String,
}

impl Navigation {
    pub fn outcome(&self) -> Outcome {
        self.decision.outcome
    }
}

pub struct Navigator<R, N> {
    routes: RouteTable,
    guard: NavigationGuard<R>,
    session: SessionContext,
    notifier: N,
    config: GuardConfig,
}

impl<R, N> Navigator<R, N>
where
    R: PrivilegeResolver,
    N: Notifier,
{
    pub fn new(
        routes: RouteTable,
        resolver: R,
        session: SessionContext,
        notifier: N,
        config: GuardConfig,
    ) -> Self {
        let guard = NavigationGuard::with_config(resolver, &config);
        Self {
            routes,
            guard,
            session,
            notifier,
            config,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Decide a transition from `from` (if any) to `to`.
    ///
    /// Paths matching no declared route carry no requirement.
    pub fn navigate(&self, from: Option<&str>, to: &str) -> Navigation {
        let resolved = self.routes.resolve(to);
        let (target, route, requirement) = match &resolved {
            Some(r) => (r.path.clone(), r.name().map(str::to_string), r.requirement()),
            None => {
                tracing::debug!(to = %to, "no route matched; treating as public");
                (normalize(to), None, Default::default())
            }
        };

        let is_login_target = match (&resolved, self.routes.resolve(&self.config.login_path)) {
            (Some(r), Some(login)) => std::ptr::eq(r.record, login.record),
            _ => target == normalize(&self.config.login_path),
        };

        let intent = NavigationIntent {
            requirement,
            is_login_target,
            previous: from.map(normalize),
        };

        let token = self.session.token();
        let decision = self.guard.decide(&intent, token.as_ref());

        if let Some(denial) = decision.denial {
            tracing::info!(
                target_path = %target,
                denial = ?denial,
                outcome = ?decision.outcome,
                "navigation denied"
            );
            self.notifier.notify(denial.message());
        } else {
            tracing::debug!(target_path = %target, outcome = ?decision.outcome, "navigation decided");
        }

        let destination = self.destination(&decision, &intent, &target);
        Navigation {
            target,
            route,
            decision,
            destination,
        }
    }

    fn destination(&self, decision: &Decision, intent: &NavigationIntent, target: &str) -> String {
        match decision.outcome {
            Outcome::Allow => target.to_string(),
            Outcome::RedirectToLogin => self.config.login_path.clone(),
            Outcome::RedirectToDashboard => self.config.dashboard_path.clone(),
            Outcome::RedirectToPrevious => intent
                .previous
                .clone()
                .unwrap_or_else(|| self.config.dashboard_path.clone()),
        }
    }
}
