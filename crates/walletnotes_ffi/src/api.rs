//! FFI use-case API for host UI calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level note functions to the host via FRB.
//! - Receive the wallet context (`connected_address`) from the host.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call loads, mutates and persists under one process-wide lock.

use chrono::SecondsFormat;
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use walletnotes_core::{
    abbreviate_address, core_version as core_version_inner, init_logging as init_logging_inner,
    open_store, ping as ping_inner, CommitOutcome, Note, NoteStorage, NoteStore,
    NotesConfig, StorageBackend, WalletNotesSession,
};

const NOTES_DB_FILE_NAME: &str = "walletnotes.sqlite3";
const DATA_DIR_ENV: &str = "WALLETNOTES_DATA_DIR";
static NOTES_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static STORE_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the directory holding the notes database.
///
/// # FFI contract
/// - Must be called before the first notes call to take effect.
/// - Repeating the same directory is accepted; a different one is rejected.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_configure_storage(data_dir: String) -> String {
    let trimmed = data_dir.trim();
    if trimmed.is_empty() {
        return "data_dir cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = NOTES_DATA_DIR.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "notes storage already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// One note as rendered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub address: String,
    /// `head...tail` form for compact labels.
    pub short_address: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    /// RFC 3339 UTC timestamp, fixed microsecond precision.
    pub created_at: String,
    /// RFC 3339 UTC timestamp.
    pub updated_at: String,
}

/// Filtered list plus the selector values derived from the full collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesListResponse {
    pub items: Vec<NoteItem>,
    /// Address actually used for filtering (may be the connected wallet).
    pub selected_address: String,
    pub all_addresses: Vec<String>,
    pub all_tags: Vec<String>,
    pub total_notes: u32,
    pub message: String,
}

/// Generic action envelope for note mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    /// Affected note id; `None` when nothing changed.
    pub note_id: Option<String>,
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: Option<String>) -> Self {
        Self {
            ok: true,
            note_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Lists notes using the host's filter inputs.
///
/// An empty `selected_address` falls back to `connected_address`.
///
/// # FFI contract
/// - Sync call, storage-backed execution.
/// - Never panics; storage failures yield an empty list with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list(
    connected_address: Option<String>,
    selected_address: String,
    search_query: String,
    filter_tag: Option<String>,
) -> NotesListResponse {
    let listed = with_session(|session| {
        session.select_address(selected_address.trim());
        session.on_wallet_connected(connected_address);
        session.set_search_query(search_query);
        session.set_filter_tag(filter_tag);

        let items = session
            .visible_notes()
            .into_iter()
            .map(to_note_item)
            .collect::<Vec<_>>();
        let message = if items.is_empty() {
            "No notes.".to_string()
        } else {
            format!("Found {} note(s).", items.len())
        };
        Ok(NotesListResponse {
            items,
            selected_address: session.filter().selected_address.clone(),
            all_addresses: session.all_addresses(),
            all_tags: session.all_tags(),
            total_notes: u32::try_from(session.stats().total_notes).unwrap_or(u32::MAX),
            message,
        })
    });

    listed.unwrap_or_else(|err| NotesListResponse {
        items: Vec::new(),
        selected_address: String::new(),
        all_addresses: Vec::new(),
        all_tags: Vec::new(),
        total_notes: 0,
        message: format!("notes_list failed: {err}"),
    })
}

/// Creates a note for `address`; `tags` is comma-separated text.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_create(
    address: String,
    title: String,
    content: String,
    tags: String,
) -> NoteActionResponse {
    let result = with_session(|session| {
        session.select_address(address);
        session.start_create();
        fill_draft(session, title, content, tags);
        session.commit().map_err(|err| err.to_string())
    });

    match result {
        Ok(CommitOutcome::Created(id)) => NoteActionResponse::success("Note created.", Some(id)),
        Ok(other) => NoteActionResponse::failure(format!("notes_create unexpected outcome: {other:?}")),
        Err(err) => NoteActionResponse::failure(format!("notes_create failed: {err}")),
    }
}

/// Replaces title, content and tags of an existing note.
///
/// Unknown ids succeed without changes (`note_id = None`).
#[flutter_rust_bridge::frb(sync)]
pub fn notes_update(
    note_id: String,
    title: String,
    content: String,
    tags: String,
) -> NoteActionResponse {
    let result = with_session(|session| {
        if !session.start_edit(&note_id) {
            return Ok(CommitOutcome::Missing(note_id.clone()));
        }
        fill_draft(session, title, content, tags);
        session.commit().map_err(|err| err.to_string())
    });

    match result {
        Ok(CommitOutcome::Updated(id)) => NoteActionResponse::success("Note updated.", Some(id)),
        Ok(CommitOutcome::Missing(_)) => {
            NoteActionResponse::success("Note not found; nothing changed.", None)
        }
        Ok(other) => NoteActionResponse::failure(format!("notes_update unexpected outcome: {other:?}")),
        Err(err) => NoteActionResponse::failure(format!("notes_update failed: {err}")),
    }
}

/// Deletes a note once the host has collected user confirmation.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_delete(note_id: String, confirmed: bool) -> NoteActionResponse {
    let result = with_session(|session| {
        session
            .delete(&note_id, |_| confirmed)
            .map_err(|err| err.to_string())
    });

    match result {
        Ok(true) => NoteActionResponse::success("Note deleted.", Some(note_id)),
        Ok(false) => NoteActionResponse::success("Nothing deleted.", None),
        Err(err) => NoteActionResponse::failure(format!("notes_delete failed: {err}")),
    }
}

fn fill_draft<S: NoteStorage>(
    session: &mut WalletNotesSession<S>,
    title: String,
    content: String,
    tags: String,
) {
    let draft = session.editor_mut().draft_mut();
    draft.title = title;
    draft.content = content;
    draft.tags = tags;
}

fn resolve_notes_data_dir() -> PathBuf {
    NOTES_DATA_DIR
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DATA_DIR_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join("walletnotes")
        })
        .clone()
}

fn with_session<T>(
    f: impl FnOnce(&mut WalletNotesSession<Box<dyn NoteStorage>>) -> Result<T, String>,
) -> Result<T, String> {
    let _guard = STORE_LOCK.lock().unwrap_or_else(|poisoned| {
        warn!("event=store_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    });

    let data_dir = resolve_notes_data_dir();
    std::fs::create_dir_all(&data_dir)
        .map_err(|err| format!("notes data dir `{}` unavailable: {err}", data_dir.display()))?;
    let config = NotesConfig::new(StorageBackend::Sqlite {
        path: data_dir.join(NOTES_DB_FILE_NAME),
    });
    let store: NoteStore<Box<dyn NoteStorage>> =
        open_store(&config).map_err(|err| format!("notes storage open failed: {err}"))?;
    let mut session = WalletNotesSession::new(store);
    f(&mut session)
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id.clone(),
        address: note.address.clone(),
        short_address: abbreviate_address(&note.address),
        title: note.title.clone(),
        content: note.content.clone(),
        tags: note.tags.clone(),
        created_at: note.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        updated_at: note.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
    }
}
