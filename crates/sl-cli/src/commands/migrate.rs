//! Migrate command implementation

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common;
use anyhow::Result;
use sl_core::SchemaVersion;
use sl_schema::{Migrator, SchemaError, SchemaResult};

/// Execute the migrate command
pub fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let mut migrator = common::build_migrator(global)?;

    let all_releases = migrator.schema_versions(None);
    if all_releases.is_empty() {
        println!("No schema release files exist. Versioned schema management is disabled.");
        return Ok(());
    }

    if let Err(e) = run_upgrade(&mut migrator, args) {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
    Ok(())
}

fn run_upgrade(migrator: &mut Migrator, args: &MigrateArgs) -> SchemaResult<()> {
    let current = migrator.current_version()?;
    let mut releases = migrator.schema_versions(current.as_ref());
    if releases.is_empty() {
        println!("The database schema is up-to-date. No changes were needed.");
        return Ok(());
    }

    if let Some(to) = &args.to {
        releases = bound_releases(releases, to)?;
    }

    apply_releases(migrator, &releases, current.is_none())
}

/// Truncate the pending list at `--to`, rejecting targets that are not
/// pending releases.
fn bound_releases(
    mut releases: Vec<SchemaVersion>,
    to: &str,
) -> SchemaResult<Vec<SchemaVersion>> {
    let target =
        SchemaVersion::try_new(to).ok_or_else(|| SchemaError::InvalidTargetVersion {
            version: to.to_string(),
        })?;
    let Some(position) = releases.iter().position(|v| *v == target) else {
        return Err(SchemaError::InvalidTargetVersion {
            version: to.to_string(),
        });
    };
    releases.truncate(position + 1);
    Ok(releases)
}

/// Apply each pending release in order, reporting progress per release.
///
/// One engine call per release, so the version marker advances after every
/// release rather than once at the end of the whole run.
fn apply_releases(
    migrator: &mut Migrator,
    releases: &[SchemaVersion],
    fresh_install: bool,
) -> SchemaResult<()> {
    println!("Applying {} patches", releases.len());
    for (index, version) in releases.iter().enumerate() {
        let action = if fresh_install && index == 0 {
            "Installing schema"
        } else {
            "Upgrading to"
        };
        println!("[{}/{}] {} {}", index + 1, releases.len(), action, version);
        migrator.upgrade_to_version(version)?;
        println!();
    }

    if let Some(last) = releases.last() {
        println!("\nSchema is now at version {last}");
    }
    Ok(())
}
