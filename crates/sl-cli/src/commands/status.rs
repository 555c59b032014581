//! Status command implementation

use crate::cli::GlobalArgs;
use crate::commands::common;
use anyhow::Result;

/// Execute the status command
pub fn execute(global: &GlobalArgs) -> Result<()> {
    let migrator = common::build_migrator(global)?;

    match migrator.current_version() {
        Ok(Some(version)) => {
            let pending = migrator.schema_versions(Some(&version));
            if pending.is_empty() {
                println!("Schema version {version} (up-to-date)");
            } else {
                let noun = if pending.len() == 1 {
                    "release"
                } else {
                    "releases"
                };
                println!(
                    "Schema version {version} ({} pending {noun})",
                    pending.len()
                );
            }
        }
        Ok(None) => println!("The database is empty. No schema version is installed."),
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}
