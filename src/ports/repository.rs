//! Repository port for Q-table persistence.
//!
//! This module defines the trait boundary between the learning core and the
//! storage format of its Q-table.

use std::{fmt::Debug, path::Path};

use crate::{Result, q_learning::QTable};

/// Port for persisting and loading Q-tables.
///
/// This trait abstracts the storage mechanism, allowing different
/// implementations (JSON, MessagePack, in-memory) without coupling the agent
/// to a specific serialization format.
///
/// # Examples
///
/// ```no_run
/// use tactician::ports::QTableRepository;
/// use tactician::q_learning::QTable;
/// use std::path::Path;
///
/// fn checkpoint<R: QTableRepository>(
///     repo: &R,
///     q_table: &QTable,
///     path: &Path,
/// ) -> tactician::Result<()> {
///     repo.save(q_table, path)
/// }
/// ```
pub trait QTableRepository: Debug + Send + Sync {
    /// Save a Q-table to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path cannot be created or written to
    /// - Serialization fails
    fn save(&self, q_table: &QTable, path: &Path) -> Result<()>;

    /// Load a Q-table from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Nothing is stored at `path` ([`crate::Error::Io`] with
    ///   [`std::io::ErrorKind::NotFound`])
    /// - The stored content is not a valid Q-table
    fn load(&self, path: &Path) -> Result<QTable>;
}

impl<R: QTableRepository + ?Sized> QTableRepository for Box<R> {
    fn save(&self, q_table: &QTable, path: &Path) -> Result<()> {
        (**self).save(q_table, path)
    }

    fn load(&self, path: &Path) -> Result<QTable> {
        (**self).load(path)
    }
}
