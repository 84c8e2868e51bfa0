//! Invocation engine: validate, connect, reconcile.
//!
//! Input errors surface before the config file is read or a client is
//! built, so they never cost a network round trip.

use anyhow::Result;
use placement::{Backend, ClientSettings, Outcome, Request};

use crate::Context;
use crate::config::Config;
use crate::progress;

/// Converge one request against the configured provider
pub fn converge(ctx: &Context, request: &Request, explicit: ClientSettings) -> Result<Outcome> {
    converge_with(ctx, request, explicit, placement::connect)
}

/// Converge one request, building the backend with `connect`
pub fn converge_with<F>(
    ctx: &Context,
    request: &Request,
    explicit: ClientSettings,
    connect: F,
) -> Result<Outcome>
where
    F: FnOnce(&ClientSettings) -> placement::Result<Box<dyn Backend>>,
{
    request.target()?;

    let config = Config::load(ctx.config.as_deref())?;
    let settings = config.client_settings(explicit);
    log::debug!(
        "Resolved region: {}",
        settings.region.as_deref().unwrap_or("<sdk default>")
    );

    let backend = connect(&settings)?;

    let pb = progress::spinner(&spinner_message(request), ctx.interactive());
    let result = placement::reconcile(&*backend, request);
    progress::finish_clear(&pb);

    Ok(result?)
}

fn spinner_message(request: &Request) -> String {
    match &request.name {
        Some(name) => format!("Reconciling placement group {name} ({})...", request.state),
        None => "Listing placement groups...".to_string(),
    }
}
