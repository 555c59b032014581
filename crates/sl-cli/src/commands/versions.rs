//! Versions command implementation

use crate::cli::{GlobalArgs, VersionsArgs};
use crate::commands::common;
use anyhow::{anyhow, Result};
use sl_core::SchemaVersion;

/// Execute the versions command
pub fn execute(args: &VersionsArgs, global: &GlobalArgs) -> Result<()> {
    let migrator = common::build_migrator(global)?;

    let since = match &args.since {
        Some(s) => Some(
            SchemaVersion::try_new(s.as_str()).ok_or_else(|| anyhow!("Invalid version: {s}"))?,
        ),
        None => None,
    };

    let versions = migrator.schema_versions(since.as_ref());
    if versions.is_empty() {
        println!("No schema releases found.");
        return Ok(());
    }
    for version in &versions {
        println!("{version}");
    }
    Ok(())
}
