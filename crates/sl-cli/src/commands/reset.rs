//! Reset command implementation

use crate::cli::{GlobalArgs, ResetArgs};
use crate::commands::common;
use anyhow::Result;

/// Execute the reset command
pub fn execute(args: &ResetArgs, global: &GlobalArgs) -> Result<()> {
    if !args.yes {
        eprintln!("Refusing to empty all tables without --yes.");
        std::process::exit(1);
    }

    let mut migrator = common::build_migrator(global)?;
    if let Err(e) = migrator.empty_all_tables() {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
    println!("All tables emptied.");
    Ok(())
}
