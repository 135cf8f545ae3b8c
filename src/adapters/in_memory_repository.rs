//! In-memory Q-table repository for testing.
//!
//! This adapter keeps serialized tables in a shared map instead of files,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, error::Error, ports::QTableRepository, q_learning::QTable};

/// In-memory repository for testing.
///
/// Tables are stored as the same JSON bytes [`super::JsonRepository`] would
/// write, keyed by path. Clones share the same storage, so a test can keep a
/// handle while the agent owns another.
///
/// # Examples
///
/// ```
/// use tactician::adapters::InMemoryRepository;
/// use tactician::ports::QTableRepository;
/// use tactician::q_learning::QTable;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// repo.save(&QTable::new(), Path::new("q.json"))?;
/// assert!(repo.contains(Path::new("q.json")));
/// # Ok::<(), tactician::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tables
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored tables.
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Check if a table exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(path)
    }

    /// Store raw bytes at `path`, bypassing serialization.
    ///
    /// Lets tests simulate corrupted files.
    pub fn insert_raw(&self, path: &Path, bytes: impl Into<Vec<u8>>) {
        self.storage().insert(path.to_path_buf(), bytes.into());
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl QTableRepository for InMemoryRepository {
    fn save(&self, q_table: &QTable, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(q_table).map_err(|e| Error::SerializationContext {
            operation: "serialize Q-table for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(path.to_path_buf(), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<QTable> {
        let storage = self.storage();

        let bytes = storage.get(path).ok_or_else(|| Error::Io {
            operation: "load Q-table from in-memory storage".to_string(),
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        serde_json::from_slice(bytes).map_err(|source| Error::MalformedQTable {
            path: path.to_path_buf(),
            format: "JSON",
            source: Box::new(source),
        })
    }
}
