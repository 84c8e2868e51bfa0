use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use placement::{DesiredState, GroupName, Strategy};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ec2-placement")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Create, remove or list EC2 placement groups", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the result as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ~/.config/ec2-placement/config.toml)
    #[arg(long, global = true, env = "EC2_PLACEMENT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Converge a placement group to the desired state
    Apply(ApplyArgs),

    /// List placement groups, optionally only the one named
    List(ListArgs),

    /// Module mode: read a JSON argument document, print a JSON result
    Run(RunArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Apply
// ============================================================================

#[derive(Args)]
pub struct ApplyArgs {
    /// Placement group name (required for present and absent)
    #[arg(short, long)]
    pub name: Option<GroupName>,

    /// Desired state: present, absent or list
    #[arg(short, long, default_value_t = DesiredState::Present)]
    pub state: DesiredState,

    /// Placement strategy for new groups: cluster
    #[arg(long, default_value_t = Strategy::Cluster)]
    pub strategy: Strategy,

    /// Region the group lives in
    #[arg(short, long, visible_aliases = ["aws-region", "ec2-region"])]
    pub region: Option<String>,

    /// EC2 endpoint override, e.g. a local emulator
    #[arg(long, visible_alias = "ec2-url", value_name = "URL")]
    pub endpoint_url: Option<String>,
}

// ============================================================================
// List
// ============================================================================

#[derive(Args)]
pub struct ListArgs {
    /// Only list the group with this exact name
    pub name: Option<GroupName>,

    /// Region to list
    #[arg(short, long, visible_aliases = ["aws-region", "ec2-region"])]
    pub region: Option<String>,

    /// EC2 endpoint override, e.g. a local emulator
    #[arg(long, visible_alias = "ec2-url", value_name = "URL")]
    pub endpoint_url: Option<String>,
}

// ============================================================================
// Run (module mode)
// ============================================================================

#[derive(Args)]
pub struct RunArgs {
    /// JSON argument document, or `-` for stdin
    #[arg(long = "args", value_name = "FILE")]
    pub args_file: PathBuf,
}
