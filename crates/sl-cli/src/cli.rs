//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// SchemaLift - versioned database schema installation and upgrades
#[derive(Parser, Debug)]
#[command(name = "sl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override database path
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install or upgrade the database schema
    Migrate(MigrateArgs),

    /// Show the installed schema version
    Status,

    /// List schema releases in the catalog
    Versions(VersionsArgs),

    /// Delete all data from all database tables
    Reset(ResetArgs),
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Stop at this version instead of the newest release
    #[arg(long)]
    pub to: Option<String>,
}

/// Arguments for the versions command
#[derive(Args, Debug)]
pub struct VersionsArgs {
    /// Only list releases newer than this version
    #[arg(long)]
    pub since: Option<String>,
}

/// Arguments for the reset command
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Confirm emptying every table
    #[arg(long)]
    pub yes: bool,
}
