//! Key-value configuration store backing the version marker.

use crate::duckdb::DuckDbBackend;
use crate::error::{DbError, DbResult};
use duckdb::Connection;
use std::sync::{Mutex, MutexGuard};

/// Name of the table holding configuration rows.
pub const CONFIG_ITEM_TABLE: &str = "configuration_item";

/// A single configuration row, stored as a key-value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigItem {
    /// Unique key identifying the row.
    pub key: String,
    /// Value, nullable in the underlying table.
    pub value: Option<String>,
}

impl ConfigItem {
    /// Create a row with a value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

/// Minimal persistence interface for configuration rows.
///
/// `persist` stages a row in memory and `flush` writes every staged row in
/// one pass; reads always go to the database.
pub trait ConfigStore: Send + Sync {
    /// Find a configuration row by its key.
    fn find_one_by_key(&self, key: &str) -> DbResult<Option<ConfigItem>>;

    /// Stage a row for the next flush.
    fn persist(&self, item: ConfigItem) -> DbResult<()>;

    /// Write all staged rows.
    fn flush(&self) -> DbResult<()>;
}

/// DuckDB-backed configuration store.
///
/// Expects the `configuration_item` table (columns `config_key`,
/// `config_value`) to exist; release SQL creates it as part of the initial
/// schema.
pub struct DuckDbConfigStore {
    conn: Mutex<Connection>,
    pending: Mutex<Vec<ConfigItem>>,
}

impl DuckDbConfigStore {
    /// Open a store on a second handle to `backend`'s database.
    pub fn from_backend(backend: &DuckDbBackend) -> DbResult<Self> {
        Ok(Self {
            conn: Mutex::new(backend.clone_connection()?),
            pending: Mutex::new(Vec::new()),
        })
    }

    fn conn(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    fn staged(&self) -> DbResult<MutexGuard<'_, Vec<ConfigItem>>> {
        self.pending
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }
}

impl ConfigStore for DuckDbConfigStore {
    fn find_one_by_key(&self, key: &str) -> DbResult<Option<ConfigItem>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT config_key, config_value FROM configuration_item WHERE config_key = ?",
            duckdb::params![key],
            |row| {
                Ok(ConfigItem {
                    key: row.get(0)?,
                    value: row.get(1)?,
                })
            },
        );
        match result {
            Ok(item) => Ok(Some(item)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DbError::QueryError(e.to_string())),
        }
    }

    fn persist(&self, item: ConfigItem) -> DbResult<()> {
        self.staged()?.push(item);
        Ok(())
    }

    fn flush(&self) -> DbResult<()> {
        let mut pending = self.staged()?;
        let conn = self.conn()?;
        for item in pending.drain(..) {
            // UPDATE first, INSERT when the key is new; avoids relying on
            // upsert support for the target table.
            let updated = conn
                .execute(
                    "UPDATE configuration_item SET config_value = ? WHERE config_key = ?",
                    duckdb::params![item.value, item.key],
                )
                .map_err(|e| DbError::ExecutionError(e.to_string()))?;
            if updated == 0 {
                conn.execute(
                    "INSERT INTO configuration_item (config_key, config_value) VALUES (?, ?)",
                    duckdb::params![item.key, item.value],
                )
                .map_err(|e| DbError::ExecutionError(e.to_string()))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
