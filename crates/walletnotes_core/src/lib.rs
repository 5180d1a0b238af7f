//! Core domain logic for Wallet Notes.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod storage;

use log::info;

pub use config::{NotesConfig, StorageBackend, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{join_tags, parse_tags, Note, NoteId, NotePatch, NoteValidationError};
pub use query::filter::{
    abbreviate_address, collection_stats, distinct_addresses, distinct_tags, filter_notes,
    NoteFilter, NoteStats,
};
pub use repo::note_store::{NoteStore, StoreError, StoreResult};
pub use service::editor::{CommitOutcome, EditorError, EditorMode, NoteDraft, NoteEditor};
pub use service::session::WalletNotesSession;
pub use storage::{
    FileStorage, MemoryStorage, NoteStorage, SqliteStorage, StorageError, StorageResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opens the configured storage and loads its note collection.
///
/// # Errors
/// - Backend open failures (e.g. SQLite migration errors). A malformed
///   payload is not an error; it loads as an empty collection.
pub fn open_store(config: &NotesConfig) -> StorageResult<NoteStore<Box<dyn NoteStorage>>> {
    let storage = config.open_storage()?;
    info!(
        "event=store_open module=core status=ok backend={}",
        config.backend_label()
    );
    Ok(NoteStore::load(storage, config.storage_key.clone()))
}

#[cfg(test)]
mod tests {
    use super::{core_version, open_store, ping, NotesConfig};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn open_store_with_default_config_starts_empty() {
        let store = open_store(&NotesConfig::default()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.storage_key(), "wallet_notes");
    }
}
