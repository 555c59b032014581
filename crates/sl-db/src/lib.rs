//! sl-db - Database abstraction layer for SchemaLift
//!
//! This crate provides the synchronous `Database` trait, the DuckDB
//! implementation, and the key-value `ConfigStore` used to persist the
//! schema version marker.

pub mod duckdb;
pub mod error;
pub mod store;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use store::{ConfigItem, ConfigStore, DuckDbConfigStore, CONFIG_ITEM_TABLE};
pub use traits::Database;
