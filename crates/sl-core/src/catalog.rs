//! Release catalog discovery.

use crate::version::SchemaVersion;
use std::path::{Path, PathBuf};

/// Name of the SQL batch file inside each release directory.
pub const RELEASE_SQL_FILE: &str = "install-app.sql";

/// Discovers schema releases under a root directory.
///
/// Each subdirectory named after a schema version is one release. The listing
/// is rebuilt from disk on every call; nothing is cached. A missing or
/// non-directory root means versioned schema management is disabled and
/// yields an empty catalog, not an error.
#[derive(Debug, Clone)]
pub struct ReleaseCatalog {
    root: PathBuf,
}

impl ReleaseCatalog {
    /// Create a catalog over `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The catalog's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List releases sorted from oldest to newest.
    ///
    /// With `since` set, only releases strictly newer than it are returned,
    /// still ascending. Hidden (dot-prefixed) entries and non-directories are
    /// ignored; directory names that do not parse as versions are skipped
    /// with a warning.
    pub fn versions(&self, since: Option<&SchemaVersion>) -> Vec<SchemaVersion> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut releases = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            match SchemaVersion::try_new(name) {
                Some(version) => releases.push(version),
                None => log::warn!(
                    "Ignoring non-version directory in {}: {}",
                    self.root.display(),
                    name
                ),
            }
        }
        releases.sort();

        match since {
            Some(since) => releases.into_iter().filter(|v| v > since).collect(),
            None => releases,
        }
    }

    /// Directory holding a release's files.
    pub fn release_dir(&self, version: &SchemaVersion) -> PathBuf {
        self.root.join(version.as_str())
    }

    /// Path to a release's SQL batch file, if one exists.
    ///
    /// A release with no SQL file is valid; it only advances the version
    /// marker.
    pub fn sql_file(&self, version: &SchemaVersion) -> Option<PathBuf> {
        let path = self.release_dir(version).join(RELEASE_SQL_FILE);
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
