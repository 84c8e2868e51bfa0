use anyhow::Result;
use placement::{ClientSettings, DesiredState, Outcome, Request, Strategy};

use crate::Context;
use crate::cli::{ApplyArgs, ListArgs};
use crate::engine;
use crate::ui;

pub fn run(ctx: &Context, args: ApplyArgs) -> Result<()> {
    let request = Request::new(args.name, args.strategy, args.state);
    let explicit = ClientSettings {
        region: args.region,
        endpoint_url: args.endpoint_url,
    };
    let outcome = engine::converge(ctx, &request, explicit)?;
    report(ctx, &outcome)
}

pub fn list(ctx: &Context, args: ListArgs) -> Result<()> {
    let request = Request::new(args.name, Strategy::default(), DesiredState::List);
    let explicit = ClientSettings {
        region: args.region,
        endpoint_url: args.endpoint_url,
    };
    let outcome = engine::converge(ctx, &request, explicit)?;
    report(ctx, &outcome)
}

fn report(ctx: &Context, outcome: &Outcome) -> Result<()> {
    if ctx.json {
        return ui::json(outcome);
    }
    if !ctx.quiet || outcome.changed {
        ui::outcome(outcome, ctx.verbose > 0);
    }
    Ok(())
}
