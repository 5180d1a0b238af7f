//! Wallet notes session facade.
//!
//! # Responsibility
//! - Compose store, editor and filter parameters for one host page.
//! - Apply the wallet context (connected address) to address selection.
//!
//! # Invariants
//! - Derived views are recomputed on every call from the current store.
//! - The connected address only pre-fills selection; it is never persisted
//!   on its own.

use crate::model::note::Note;
use crate::query::filter::{
    collection_stats, distinct_addresses, distinct_tags, filter_notes, NoteFilter, NoteStats,
};
use crate::repo::note_store::{NoteStore, StoreResult};
use crate::service::editor::{CommitOutcome, EditorError, NoteEditor};
use crate::storage::NoteStorage;

/// One page instance of the notes manager.
pub struct WalletNotesSession<S: NoteStorage> {
    store: NoteStore<S>,
    editor: NoteEditor,
    filter: NoteFilter,
    connected_address: Option<String>,
}

impl<S: NoteStorage> WalletNotesSession<S> {
    pub fn new(store: NoteStore<S>) -> Self {
        Self {
            store,
            editor: NoteEditor::new(),
            filter: NoteFilter::default(),
            connected_address: None,
        }
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    pub fn editor(&self) -> &NoteEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut NoteEditor {
        &mut self.editor
    }

    pub fn filter(&self) -> &NoteFilter {
        &self.filter
    }

    pub fn connected_address(&self) -> Option<&str> {
        self.connected_address.as_deref()
    }

    /// Records the wallet context; selects it when nothing is selected yet.
    pub fn on_wallet_connected(&mut self, address: Option<String>) {
        let address = address.filter(|value| !value.trim().is_empty());
        if let Some(value) = address.as_deref() {
            if self.filter.selected_address.is_empty() {
                self.filter.selected_address = value.to_string();
            }
        }
        self.connected_address = address;
    }

    /// Selects the connected wallet and opens a create session for it.
    ///
    /// Returns `false` when no wallet is connected.
    pub fn use_connected_wallet(&mut self) -> bool {
        let Some(address) = self.connected_address.clone() else {
            return false;
        };
        self.filter.selected_address = address.clone();
        self.editor.start_create(address);
        true
    }

    pub fn select_address(&mut self, address: impl Into<String>) {
        self.filter.selected_address = address.into();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter.search_query = query.into();
    }

    /// Sets the tag filter; `None` or an empty tag clears it.
    pub fn set_filter_tag(&mut self, tag: Option<String>) {
        self.filter.filter_tag = tag.filter(|value| !value.is_empty());
    }

    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(self.store.notes(), &self.filter)
    }

    pub fn all_addresses(&self) -> Vec<String> {
        distinct_addresses(self.store.notes())
    }

    pub fn all_tags(&self) -> Vec<String> {
        distinct_tags(self.store.notes())
    }

    pub fn stats(&self) -> NoteStats {
        collection_stats(self.store.notes())
    }

    /// Opens a create session for the selected address.
    pub fn start_create(&mut self) {
        self.editor.start_create(self.filter.selected_address.clone());
    }

    /// Opens an edit session for `id`. Returns `false` for unknown ids.
    pub fn start_edit(&mut self, id: &str) -> bool {
        match self.store.get(id) {
            Some(note) => {
                self.editor.start_edit(note);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    pub fn commit(&mut self) -> Result<CommitOutcome, EditorError> {
        self.editor.commit(&mut self.store)
    }

    /// Deletes `id` when `confirm` approves. Returns whether a note was removed.
    pub fn delete(&mut self, id: &str, confirm: impl FnOnce(&Note) -> bool) -> StoreResult<bool> {
        Ok(self.store.remove(id, confirm)?.is_some())
    }
}
