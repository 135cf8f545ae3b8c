//! MessagePack implementation of the Q-table repository.
//!
//! Same nested mapping as the JSON format, written with rmp_serde for a more
//! compact binary file. Useful for large boards whose tables grow big.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::QTableRepository, q_learning::QTable};

/// MessagePack-based Q-table repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl QTableRepository for MsgPackRepository {
    fn save(&self, q_table: &QTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: "create Q-table file".to_string(),
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, q_table).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize Q-table to MessagePack".to_string(),
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

        rmp_serde::decode::from_read(BufReader::new(file)).map_err(|source| {
            Error::MalformedQTable {
                path: path.to_path_buf(),
                format: "MessagePack",
                source: Box::new(source),
            }
        })
    }
}
