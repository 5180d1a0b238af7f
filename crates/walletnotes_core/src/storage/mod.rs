//! Key-value persistence port for the note collection.
//!
//! # Responsibility
//! - Define the injectable slot storage contract used by `NoteStore`.
//! - Provide memory, file and SQLite backends.
//!
//! # Invariants
//! - A slot holds one opaque string; backends never interpret it.
//! - `write` replaces the whole slot value or fails without partial writes.

use crate::db::DbError;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod file;
pub mod sqlite;

pub use file::FileStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend failure while reading or writing a slot.
#[derive(Debug)]
pub enum StorageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Db(DbError),
    /// Slot key cannot be mapped onto the backend (e.g. path separators).
    InvalidKey(String),
    /// Backend refused the write (quota exceeded, storage disabled).
    WriteRejected(String),
    MissingRequiredTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "storage io error at `{}`: {source}", path.display()),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid storage key: `{key}`"),
            Self::WriteRejected(reason) => write!(f, "storage write rejected: {reason}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table: {table}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named-slot persistence contract.
pub trait NoteStorage {
    /// Returns the slot value, or `None` when the slot was never written.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the slot value.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: NoteStorage + ?Sized> NoteStorage for Box<S> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }
}

/// In-process slot map.
///
/// Writes can be switched to fail, which lets callers exercise the
/// rejected-write path without a real quota.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    reject_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one slot with a raw value.
    pub fn with_slot(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }

    /// Makes every following write fail with `WriteRejected`.
    pub fn set_reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    /// Raw slot value, for inspection.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl NoteStorage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.reject_writes {
            return Err(StorageError::WriteRejected(format!(
                "memory storage is read-only (slot `{key}`)"
            )));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
