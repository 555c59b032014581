//! Shared helpers for CLI commands.

use crate::cli::GlobalArgs;
use anyhow::{Context, Result};
use sl_core::{Config, ReleaseCatalog};
use sl_db::{DuckDbBackend, DuckDbConfigStore};
use sl_schema::Migrator;
use std::path::Path;
use std::sync::Arc;

/// Build a migrator from the project configuration and global overrides.
pub fn build_migrator(global: &GlobalArgs) -> Result<Migrator> {
    let project_dir = Path::new(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load_from_path(Path::new(path)),
        None => Config::load_from_dir(project_dir),
    }
    .context("Failed to load project config")?;

    let db_path = global.target.as_ref().unwrap_or(&config.database.path);
    if global.verbose {
        eprintln!("[verbose] Using database at {db_path}");
    }

    let backend = Arc::new(DuckDbBackend::new(db_path).context("Failed to connect to database")?);
    let store = Arc::new(
        DuckDbConfigStore::from_backend(&backend).context("Failed to open config store")?,
    );

    let catalog = ReleaseCatalog::new(config.schema_dir_absolute(project_dir));
    if global.verbose {
        eprintln!("[verbose] Release catalog at {}", catalog.root().display());
    }

    Ok(Migrator::new(catalog, store, backend))
}
