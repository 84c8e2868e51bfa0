//! Module mode: the automation-tool entry point.
//!
//! Reads a JSON argument document from a file or stdin and always answers
//! with a JSON payload on stdout.

use anyhow::{Context as AnyhowContext, Result};
use placement::{Backend, ClientSettings, ModuleArgs, Outcome};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::Context;
use crate::cli::RunArgs;
use crate::engine;
use crate::ui;

pub fn run(ctx: &Context, args: RunArgs) -> Result<()> {
    let input = read_args(&args.args_file)?;
    let outcome = execute(ctx, &input, placement::connect)?;
    ui::json(&outcome)
}

/// Parse an argument document and converge it
fn execute<F>(ctx: &Context, input: &str, connect: F) -> Result<Outcome>
where
    F: FnOnce(&ClientSettings) -> placement::Result<Box<dyn Backend>>,
{
    let module_args = ModuleArgs::from_json(input)?;
    log::debug!("Module arguments: {:?}", module_args);

    let explicit = ClientSettings {
        region: module_args.region,
        endpoint_url: module_args.endpoint_url,
    };
    engine::converge_with(ctx, &module_args.request, explicit, connect)
}

fn read_args(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Could not read arguments from stdin")?;
        return Ok(input);
    }

    fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))
}
