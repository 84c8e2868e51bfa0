mod cli;
mod commands;
mod config;
mod engine;
mod progress;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub json: bool,
    pub config: Option<PathBuf>,
}

impl Context {
    /// Whether transient output (spinners) may be drawn
    pub fn interactive(&self) -> bool {
        !self.quiet && !self.json && io::stderr().is_terminal()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        // Module mode always answers in JSON, failures included
        json: cli.json || matches!(cli.command, Command::Run(_)),
        config: cli.config,
    };

    let result = dispatch(&ctx, cli.command);
    ExitCode::from(exit_status(&ctx, result))
}

/// Exit status: 0 for any success, changed or not; 1 once a failure is reported
fn exit_status(ctx: &Context, result: Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            report_failure(ctx, &err);
            1
        }
    }
}

fn dispatch(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Apply(args) => commands::apply::run(ctx, args),
        Command::List(args) => commands::apply::list(ctx, args),
        Command::Run(args) => commands::run::run(ctx, args),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "ec2-placement", &mut io::stdout());
            Ok(())
        }
    }
}

fn report_failure(ctx: &Context, err: &anyhow::Error) {
    let category = err
        .downcast_ref::<placement::Error>()
        .map(placement::Error::category);
    log::debug!("Invocation failed: {err:?}");

    if ctx.json {
        let msg = format!("{err:#}");
        let failure = ui::Failure {
            failed: true,
            msg: &msg,
        };
        if let Err(e) = ui::json(&failure) {
            eprintln!("{msg} (could not encode failure: {e})");
        }
    } else {
        ui::failure(&format!("{err:#}"), category);
    }
}
