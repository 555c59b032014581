//! Database connection trait.

use crate::error::DbResult;

/// Connection to the application database being migrated.
///
/// All operations are synchronous and block the calling thread.
/// Implementations must be Send + Sync so a single connection can be shared
/// between the migrator and the CLI.
pub trait Database: Send + Sync {
    /// Verify that the connection is usable.
    fn connect(&self) -> DbResult<()>;

    /// Execute a single SQL statement, returning the number of affected rows.
    fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Names of all tables visible on this connection.
    fn list_table_names(&self) -> DbResult<Vec<String>>;

    /// Whether every named table exists.
    fn tables_exist(&self, names: &[&str]) -> DbResult<bool>;

    /// Toggle foreign-key enforcement for the session, where the engine
    /// supports it.
    fn set_foreign_key_checks(&self, enabled: bool) -> DbResult<()>;

    /// Delete all rows from a table.
    fn truncate_table(&self, name: &str) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
