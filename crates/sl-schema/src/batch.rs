//! SQL batch file execution.
//!
//! A batch file is plain UTF-8 text holding one or more statements. A
//! statement ends on the line whose accumulated, trimmed content ends with
//! `;`. Blank lines and lines whose trimmed content starts with `--` never
//! reach the buffer, so they cannot shift error attribution for later
//! statements.

use crate::error::{SchemaError, SchemaResult};
use sl_db::Database;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Execute every statement in `path` sequentially against `db`.
///
/// Statements run one at a time on the live connection, so statements before
/// a failing one stay applied. A failure carries the file path, the 1-based
/// line number of the failing statement's terminating line, and the driver
/// error.
pub fn execute_batch_file(db: &dyn Database, path: &Path) -> SchemaResult<()> {
    let file = File::open(path).map_err(|e| SchemaError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    let mut statement = String::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|e| SchemaError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }

        statement.push_str(&line);
        statement.push('\n');

        if statement.trim_end().ends_with(';') {
            log::debug!(
                "Executing statement ending at {} line {}",
                path.display(),
                line_number
            );
            if let Err(source) = db.execute(&statement) {
                return Err(SchemaError::Apply {
                    file: path.display().to_string(),
                    line: line_number,
                    source,
                });
            }
            statement.clear();
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
