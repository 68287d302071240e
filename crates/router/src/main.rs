use std::sync::Arc;

use anyhow::Context;

use navguard_auth::{ClaimsResolver, Hs256Decoder, SessionContext};
use navguard_core::{MemoryStorage, SessionStorage, TOKEN_KEY};
use navguard_router::{GuardConfig, Navigator, RouteTable, TracingNotifier, application_routes};

/// Decide a single navigation and print it as JSON.
///
/// Usage: `navguard <to> [from]`, session token taken from `NAVGUARD_TOKEN`.
fn main() -> anyhow::Result<()> {
    navguard_observability::init();

    let config = GuardConfig::from_env().context("invalid guard configuration")?;

    let resolver = match std::env::var("NAVGUARD_JWT_SECRET") {
        Ok(secret) => ClaimsResolver::new(Hs256Decoder::new(secret)),
        Err(_) => {
            tracing::warn!("NAVGUARD_JWT_SECRET not set; admin claims are not signature-checked");
            ClaimsResolver::unverified()
        }
    };

    let storage = Arc::new(MemoryStorage::new());
    if let Ok(token) = std::env::var("NAVGUARD_TOKEN") {
        storage.set(TOKEN_KEY, &token)?;
    }

    let mut args = std::env::args().skip(1);
    let to = args.next().context("usage: navguard <to> [from]")?;
    let from = args.next();

    let routes = RouteTable::new(application_routes()).context("invalid route declarations")?;
    let navigator = Navigator::new(
        routes,
        resolver,
        SessionContext::new(storage),
        TracingNotifier,
        config,
    );

    let navigation = navigator.navigate(from.as_deref(), &to);
    println!("{}", serde_json::to_string_pretty(&navigation)?);

    Ok(())
}
