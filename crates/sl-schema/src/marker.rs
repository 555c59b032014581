//! Version marker accessors.
//!
//! The marker is a single configuration row with a fixed key whose value is
//! the most recently fully-applied schema version. These typed accessors are
//! the only way the engine touches the configuration store, keeping the
//! one-row invariant in one place.

use crate::error::SchemaResult;
use sl_core::SchemaVersion;
use sl_db::{ConfigItem, ConfigStore};

/// Key of the configuration row holding the installed schema version.
pub const SCHEMA_VERSION_KEY: &str = "schema_version";

/// Read the version marker, if present and well-formed.
///
/// An absent row, an empty value, and a value that does not parse as a
/// version all read as `None`; the caller decides whether that means "nothing
/// installed" or an inconsistency.
pub fn read_version_marker(store: &dyn ConfigStore) -> SchemaResult<Option<SchemaVersion>> {
    let Some(item) = store.find_one_by_key(SCHEMA_VERSION_KEY)? else {
        return Ok(None);
    };
    let Some(value) = item.value.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    match SchemaVersion::try_new(value.as_str()) {
        Some(version) => Ok(Some(version)),
        None => {
            log::warn!("Version marker holds an unparseable value: {value}");
            Ok(None)
        }
    }
}

/// Create or update the marker and flush in one write.
pub fn write_version_marker(store: &dyn ConfigStore, version: &SchemaVersion) -> SchemaResult<()> {
    let item = match store.find_one_by_key(SCHEMA_VERSION_KEY)? {
        Some(mut item) => {
            item.value = Some(version.as_str().to_string());
            item
        }
        None => ConfigItem::new(SCHEMA_VERSION_KEY, version.as_str()),
    };
    store.persist(item)?;
    store.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "marker_test.rs"]
mod tests;
