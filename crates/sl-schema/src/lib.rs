//! sl-schema - Versioned schema migration engine for SchemaLift
//!
//! Discovers schema releases through the catalog, determines the installed
//! version from a persisted marker row, and applies pending releases in
//! semantic-version order by executing their SQL batch files.

pub mod batch;
pub mod error;
pub mod marker;
pub mod migrator;

pub use batch::execute_batch_file;
pub use error::{SchemaError, SchemaResult};
pub use marker::SCHEMA_VERSION_KEY;
pub use migrator::Migrator;
