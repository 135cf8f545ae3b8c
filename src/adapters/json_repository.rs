//! JSON implementation of the Q-table repository.
//!
//! This is the canonical on-disk format: a nested object whose outer keys are
//! state strings and whose inner keys are move indices written as decimal
//! text, e.g. `{"X   O    ": {"2": 0.1, "8": -0.05}}`.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::QTableRepository, q_learning::QTable};

/// JSON-based Q-table repository.
///
/// File handles are scoped to each call and released on every exit path,
/// including deserialization failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl JsonRepository {
    /// Create a new JSON repository.
    pub fn new() -> Self {
        Self
    }
}

impl QTableRepository for JsonRepository {
    fn save(&self, q_table: &QTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: "create Q-table file".to_string(),
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer(&mut writer, q_table).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize Q-table to JSON".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: "write Q-table file".to_string(),
            path: path.to_path_buf(),
            source,
        })
    }

    fn load(&self, path: &Path) -> Result<QTable> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: "open Q-table file".to_string(),
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::MalformedQTable {
            path: path.to_path_buf(),
            format: "JSON",
            source: Box::new(source),
        })
    }
}
