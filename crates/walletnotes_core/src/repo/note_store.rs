//! Note collection store over a slot storage port.
//!
//! # Responsibility
//! - Own the in-memory note collection and its durability.
//! - Validate every write and persist the full collection after each mutation.
//!
//! # Invariants
//! - Memory and storage agree after every call: a failed write leaves the
//!   in-memory collection unchanged.
//! - The collection never holds two notes with the same id.
//! - Unreadable or malformed stored data loads as an empty collection.
//! - Updates and removals of unknown ids are no-ops.

use crate::model::note::{Note, NoteId, NotePatch, NoteValidationError};
use crate::storage::{NoteStorage, StorageError};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Mutation failure reported by [`NoteStore`].
#[derive(Debug)]
pub enum StoreError {
    Validation(NoteValidationError),
    Storage(StorageError),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Single-writer owner of the note collection.
pub struct NoteStore<S: NoteStorage> {
    storage: S,
    key: String,
    notes: Vec<Note>,
}

impl<S: NoteStorage> NoteStore<S> {
    /// Loads the collection stored under `key`.
    ///
    /// Never fails: a missing slot, a read error or a malformed payload all
    /// produce an empty collection (the latter two with a diagnostic log).
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let notes = read_collection(&storage, &key);
        info!(
            "event=store_load module=store status=ok count={}",
            notes.len()
        );
        Self {
            storage,
            key,
            notes,
        }
    }

    /// Re-reads the slot, discarding the in-memory collection.
    pub fn reload(&mut self) {
        self.notes = read_collection(&self.storage, &self.key);
    }

    /// Current collection in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Validates, serializes and persists `collection`, then makes it current.
    ///
    /// # Errors
    /// - `Validation` when a record is invalid or an id repeats.
    /// - `Encode`/`Storage` when the write fails; memory is left unchanged.
    pub fn save(&mut self, collection: Vec<Note>) -> StoreResult<()> {
        validate_collection(&collection)?;
        let payload = encode_collection(&collection)?;
        if let Err(err) = self.storage.write(&self.key, &payload) {
            error!(
                "event=store_save module=store status=error count={} error={}",
                collection.len(),
                err
            );
            return Err(err.into());
        }
        self.notes = collection;
        Ok(())
    }

    /// Appends a new note and persists.
    ///
    /// Returns the id of the stored note.
    pub fn add(&mut self, note: Note) -> StoreResult<NoteId> {
        note.validate()?;
        if note.address.trim().is_empty() {
            return Err(NoteValidationError::EmptyAddress.into());
        }
        if self.get(&note.id).is_some() {
            return Err(NoteValidationError::DuplicateId(note.id).into());
        }

        let id = note.id.clone();
        let mut candidate = self.notes.clone();
        candidate.push(note);
        self.save(candidate)?;
        info!(
            "event=note_add module=store status=ok count={}",
            self.notes.len()
        );
        Ok(id)
    }

    /// Applies `patch` to the note with `id` and persists.
    ///
    /// Returns `Ok(None)` without touching storage when `id` is unknown.
    pub fn update(&mut self, id: &str, patch: NotePatch) -> StoreResult<Option<&Note>> {
        patch.validate()?;
        let Some(index) = self.position(id) else {
            debug!("event=note_update module=store status=skipped reason=not_found");
            return Ok(None);
        };

        let mut candidate = self.notes.clone();
        candidate[index].apply_patch(patch);
        self.save(candidate)?;
        info!("event=note_update module=store status=ok");
        Ok(self.notes.get(index))
    }

    /// Removes the note with `id` when `confirm` approves it, then persists.
    ///
    /// `confirm` sees the note about to be removed and is not called for
    /// unknown ids. Returns the removed note, or `None` when nothing changed.
    pub fn remove(
        &mut self,
        id: &str,
        confirm: impl FnOnce(&Note) -> bool,
    ) -> StoreResult<Option<Note>> {
        let Some(index) = self.position(id) else {
            debug!("event=note_remove module=store status=skipped reason=not_found");
            return Ok(None);
        };
        if !confirm(&self.notes[index]) {
            debug!("event=note_remove module=store status=skipped reason=not_confirmed");
            return Ok(None);
        }

        let mut candidate = self.notes.clone();
        let removed = candidate.remove(index);
        self.save(candidate)?;
        info!(
            "event=note_remove module=store status=ok count={}",
            self.notes.len()
        );
        Ok(Some(removed))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }
}

/// Serializes a collection into the stored JSON array layout.
pub fn encode_collection(notes: &[Note]) -> Result<String, serde_json::Error> {
    serde_json::to_string(notes)
}

/// Parses and validates a stored JSON array.
pub fn decode_collection(raw: &str) -> Result<Vec<Note>, String> {
    let notes: Vec<Note> = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    validate_collection(&notes).map_err(|err| err.to_string())?;
    Ok(notes)
}

fn validate_collection(notes: &[Note]) -> Result<(), NoteValidationError> {
    let mut seen = HashSet::with_capacity(notes.len());
    for note in notes {
        note.validate()?;
        if !seen.insert(note.id.as_str()) {
            return Err(NoteValidationError::DuplicateId(note.id.clone()));
        }
    }
    Ok(())
}

fn read_collection<S: NoteStorage>(storage: &S, key: &str) -> Vec<Note> {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            error!(
                "event=store_load module=store status=error error_code=read_failed error={}",
                err
            );
            return Vec::new();
        }
    };

    match decode_collection(&raw) {
        Ok(notes) => notes,
        Err(reason) => {
            warn!(
                "event=store_load module=store status=degraded error_code=malformed_payload bytes={} error={}",
                raw.len(),
                reason
            );
            Vec::new()
        }
    }
}
