//! Versioned schema migration engine.

use crate::batch::execute_batch_file;
use crate::error::{SchemaError, SchemaResult};
use crate::marker::{read_version_marker, write_version_marker};
use sl_core::{ReleaseCatalog, SchemaVersion};
use sl_db::{ConfigStore, Database, CONFIG_ITEM_TABLE};
use std::path::Path;
use std::sync::Arc;

/// Applies versioned schema releases to the application database.
///
/// The only durable state the migrator owns is the version marker row; the
/// release catalog is re-read from disk on every query. Assumes it is the
/// only migrator running against the database for the duration of a call.
pub struct Migrator {
    catalog: ReleaseCatalog,
    store: Arc<dyn ConfigStore>,
    db: Arc<dyn Database>,
    connected: bool,
}

impl Migrator {
    /// Create a migrator over `catalog`, using `store` for the version marker
    /// and `db` for schema inspection and batch execution.
    pub fn new(catalog: ReleaseCatalog, store: Arc<dyn ConfigStore>, db: Arc<dyn Database>) -> Self {
        Self {
            catalog,
            store,
            db,
            connected: false,
        }
    }

    /// Available schema versions, oldest first.
    ///
    /// With `since` set, only versions strictly newer than it.
    pub fn schema_versions(&self, since: Option<&SchemaVersion>) -> Vec<SchemaVersion> {
        self.catalog.versions(since)
    }

    /// The currently installed schema version.
    ///
    /// `None` means an empty database with nothing installed. A database that
    /// has tables but no readable marker is inconsistent and reported as an
    /// error rather than treated as empty.
    pub fn current_version(&self) -> SchemaResult<Option<SchemaVersion>> {
        let tables = self.db.list_table_names()?;
        if tables.is_empty() {
            return Ok(None);
        }

        if !self.db.tables_exist(&[CONFIG_ITEM_TABLE])? {
            return Err(SchemaError::Inconsistent(
                "The database contains unknown tables. Please remove these existing tables \
                 before using this tool to manage the schema."
                    .to_string(),
            ));
        }

        match read_version_marker(self.store.as_ref())? {
            Some(version) => Ok(Some(version)),
            None => Err(SchemaError::Inconsistent(
                "Unable to determine the version of the existing database schema.".to_string(),
            )),
        }
    }

    /// Upgrade to the newest version in the catalog.
    ///
    /// Does nothing if already at the latest version or the catalog is empty.
    pub fn upgrade_to_latest(&mut self) -> SchemaResult<()> {
        let versions = self.schema_versions(None);
        let current = self.current_version()?;
        let Some(latest) = versions.last().cloned() else {
            return Ok(());
        };
        if current.as_ref() == Some(&latest) {
            return Ok(());
        }
        self.upgrade_to_version(&latest)
    }

    /// Upgrade to `target`, applying every release between the current
    /// version and `target` in ascending order.
    ///
    /// `target` must be among the releases newer than the current version;
    /// anything else (at or below current, or not in the catalog) fails with
    /// [`SchemaError::InvalidTargetVersion`] before any database write.
    ///
    /// The version marker is written once, after the whole batch has been
    /// applied. Releases already executed before a failure stay applied;
    /// release SQL is mostly DDL, which cannot be rolled back reliably.
    pub fn upgrade_to_version(&mut self, target: &SchemaVersion) -> SchemaResult<()> {
        let current = self.current_version()?;
        let pending = self.schema_versions(current.as_ref());
        if !pending.contains(target) {
            return Err(SchemaError::InvalidTargetVersion {
                version: target.as_str().to_string(),
            });
        }

        self.connect()?;
        for version in &pending {
            self.apply_release(version)?;
            if version == target {
                break;
            }
        }

        write_version_marker(self.store.as_ref(), target)
    }

    /// Run a single SQL batch file against the engine's connection,
    /// establishing it on first use.
    ///
    /// Exposed for one-off operational scripts outside the versioned upgrade
    /// path.
    pub fn run_batch_file(&mut self, path: &Path) -> SchemaResult<()> {
        self.connect()?;
        execute_batch_file(self.db.as_ref(), path)
    }

    /// Delete all rows from every table.
    ///
    /// Reset helper for test scenarios; not part of the versioned upgrade
    /// path and does not touch the version marker.
    pub fn empty_all_tables(&mut self) -> SchemaResult<()> {
        self.connect()?;
        self.db.set_foreign_key_checks(false)?;
        for table in self.db.list_table_names()? {
            self.db.truncate_table(&table)?;
        }
        self.db.set_foreign_key_checks(true)?;
        Ok(())
    }

    /// Apply one release. Assumes the database is at the release just below
    /// `version`.
    fn apply_release(&self, version: &SchemaVersion) -> SchemaResult<()> {
        let dir = self.catalog.release_dir(version);
        if !dir.is_dir() {
            return Err(SchemaError::ReleaseNotFound {
                path: dir.display().to_string(),
            });
        }

        match self.catalog.sql_file(version) {
            Some(sql_file) => {
                log::debug!("Applying release {version} from {}", sql_file.display());
                execute_batch_file(self.db.as_ref(), &sql_file)
            }
            None => {
                log::debug!("Release {version} has no SQL file; version bump only");
                Ok(())
            }
        }
    }

    /// Establish the batch-execution connection on first use and reuse it for
    /// the remainder of the call.
    fn connect(&mut self) -> SchemaResult<()> {
        if !self.connected {
            self.db.connect()?;
            self.connected = true;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
