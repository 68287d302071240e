//! `navguard-router`: the navigation guard and the route table it protects.
//!
//! - `guard`: pure decision procedure (no IO, no presentation)
//! - `route`: declarative route requirements + path matching
//! - `navigator`: caller-side wiring (reads the session, notifies, picks the destination)

pub mod config;
pub mod guard;
pub mod navigator;
pub mod notify;
pub mod route;
pub mod routes;

pub use config::{ConfigError, GuardConfig, PrivilegeDenialRedirect};
pub use guard::{Decision, Denial, NavigationGuard, NavigationIntent, Outcome};
pub use navigator::{Navigation, Navigator};
pub use notify::{Notifier, RecordingNotifier, TracingNotifier};
pub use route::{ResolvedRoute, RouteError, RouteRecord, RouteRequirement, RouteTable};
pub use routes::application_routes;
