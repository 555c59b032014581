//! SchemaLift CLI - versioned database schema installation and upgrades

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{migrate, reset, status, versions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Migrate(args) => migrate::execute(args, &cli.global),
        cli::Commands::Status => status::execute(&cli.global),
        cli::Commands::Versions(args) => versions::execute(args, &cli.global),
        cli::Commands::Reset(args) => reset::execute(args, &cli.global),
    }
}
