//! Notes storage configuration.
//!
//! # Responsibility
//! - Name the storage slot and backend used by one notes store.
//! - Build the boxed storage port from that description.

use crate::storage::{FileStorage, MemoryStorage, NoteStorage, SqliteStorage, StorageResult};
use std::path::PathBuf;

/// Slot key used when the host does not override it.
pub const DEFAULT_STORAGE_KEY: &str = "wallet_notes";

/// Which slot backend persists the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local map; nothing survives a restart.
    #[default]
    Memory,
    /// One JSON file per slot inside `dir`.
    File { dir: PathBuf },
    /// `kv_store` table inside the SQLite file at `path`.
    Sqlite { path: PathBuf },
}

/// Storage configuration for a notes store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    pub storage_key: String,
    pub backend: StorageBackend,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            backend: StorageBackend::default(),
        }
    }
}

impl NotesConfig {
    pub fn new(backend: StorageBackend) -> Self {
        Self {
            backend,
            ..Self::default()
        }
    }

    /// Overrides the slot key. Blank keys fall back to the default.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        let trimmed = key.trim();
        self.storage_key = if trimmed.is_empty() {
            DEFAULT_STORAGE_KEY.to_string()
        } else {
            trimmed.to_string()
        };
        self
    }

    /// Opens the configured backend.
    ///
    /// # Errors
    /// - SQLite open/migration failures for `StorageBackend::Sqlite`.
    pub fn open_storage(&self) -> StorageResult<Box<dyn NoteStorage>> {
        let storage: Box<dyn NoteStorage> = match &self.backend {
            StorageBackend::Memory => Box::new(MemoryStorage::new()),
            StorageBackend::File { dir } => Box::new(FileStorage::new(dir.clone())),
            StorageBackend::Sqlite { path } => Box::new(SqliteStorage::open(path)?),
        };
        Ok(storage)
    }

    pub(crate) fn backend_label(&self) -> &'static str {
        match self.backend {
            StorageBackend::Memory => "memory",
            StorageBackend::File { .. } => "file",
            StorageBackend::Sqlite { .. } => "sqlite",
        }
    }
}
