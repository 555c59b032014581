//! Configuration types and parsing for schemalift.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "schemalift.yml";

/// Main project configuration from schemalift.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directory containing version-named release subdirectories
    #[serde(default = "default_schema_dir")]
    pub schema_dir: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Path to the DuckDB database file, or ":memory:"
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_schema_dir() -> String {
    "schema".to_string()
}

fn default_database_path() -> String {
    "app.duckdb".to_string()
}

impl Config {
    /// Load configuration from a project directory containing schemalift.yml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        Self::load_from_path(&dir.join(CONFIG_FILE))
    }

    /// Load configuration from an explicit file path
    pub fn load_from_path(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "project name must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve the schema directory against the project root.
    pub fn schema_dir_absolute(&self, root: &Path) -> PathBuf {
        let dir = Path::new(&self.schema_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            root.join(dir)
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
