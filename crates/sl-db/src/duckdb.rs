//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Open a second handle onto the same database instance.
    ///
    /// The migrator and the marker store each hold their own connection;
    /// cloning shares the underlying database without re-opening the file.
    pub fn try_clone(&self) -> DbResult<Self> {
        let conn = self.clone_connection()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(crate) fn clone_connection(&self) -> DbResult<Connection> {
        self.conn()?
            .try_clone()
            .map_err(|e| DbError::ConnectionError(e.to_string()))
    }

    fn conn(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }
}

impl Database for DuckDbBackend {
    fn connect(&self) -> DbResult<()> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(())
    }

    fn execute(&self, sql: &str) -> DbResult<usize> {
        let conn = self.conn()?;
        conn.execute(sql, [])
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn list_table_names(&self) -> DbResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT table_name FROM information_schema.tables \
                 WHERE table_schema = 'main' ORDER BY table_name",
            )
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row.map_err(|e| DbError::QueryError(e.to_string()))?);
        }
        Ok(names)
    }

    fn tables_exist(&self, names: &[&str]) -> DbResult<bool> {
        let existing = self.list_table_names()?;
        Ok(names.iter().all(|name| existing.iter().any(|t| t == name)))
    }

    fn set_foreign_key_checks(&self, enabled: bool) -> DbResult<()> {
        // DuckDB has no session-level foreign key switch; enforcement stays
        // on and truncation order falls to the caller.
        log::debug!("duckdb: ignoring foreign key checks toggle (enabled={enabled})");
        Ok(())
    }

    fn truncate_table(&self, name: &str) -> DbResult<()> {
        // DELETE rather than TRUNCATE keeps this working on older DuckDB
        // releases.
        self.execute(&format!("DELETE FROM \"{name}\"")).map(|_| ())
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
