//! Create/edit form state.
//!
//! # Responsibility
//! - Hold the in-progress draft for one create or edit session.
//! - Validate and commit the draft through `NoteStore`.
//!
//! # Invariants
//! - At most one session is open; starting another discards the old draft.
//! - Nothing is written to storage before `commit`.
//! - A rejected commit keeps the session and draft intact.

use crate::model::note::{join_tags, parse_tags, Note, NoteId, NotePatch, NoteValidationError};
use crate::repo::note_store::{NoteStore, StoreError};
use crate::storage::NoteStorage;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Editor session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorMode {
    #[default]
    Idle,
    Creating,
    Editing {
        note_id: NoteId,
    },
}

/// Raw form fields; `tags` is the comma-separated text as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub address: String,
    pub title: String,
    pub content: String,
    pub tags: String,
}

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Created(NoteId),
    Updated(NoteId),
    /// The edited note no longer exists; nothing was written.
    Missing(NoteId),
}

#[derive(Debug)]
pub enum EditorError {
    /// `commit` called while idle.
    NotOpen,
    Validation(NoteValidationError),
    Store(StoreError),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOpen => write!(f, "no note is being created or edited"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotOpen => None,
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for EditorError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

/// Transient create/edit form.
#[derive(Debug, Clone, Default)]
pub struct NoteEditor {
    mode: EditorMode,
    draft: NoteDraft,
}

impl NoteEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != EditorMode::Idle
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut NoteDraft {
        &mut self.draft
    }

    /// Opens an empty create session for `address`.
    pub fn start_create(&mut self, address: impl Into<String>) {
        self.draft = NoteDraft {
            address: address.into(),
            ..NoteDraft::default()
        };
        self.mode = EditorMode::Creating;
    }

    /// Opens an edit session preloaded from `note`.
    pub fn start_edit(&mut self, note: &Note) {
        self.draft = NoteDraft {
            address: note.address.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            tags: join_tags(&note.tags),
        };
        self.mode = EditorMode::Editing {
            note_id: note.id.clone(),
        };
    }

    /// Drops the draft without touching the store.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Validates the draft and writes it through `store`.
    ///
    /// # Errors
    /// - `NotOpen` while idle.
    /// - `Validation` for blank title/content (or address when creating).
    /// - `Store` when persistence fails.
    ///
    /// The session stays open on every error.
    pub fn commit<S: NoteStorage>(
        &mut self,
        store: &mut NoteStore<S>,
    ) -> Result<CommitOutcome, EditorError> {
        let patch = self.validated_patch()?;
        let outcome = match &self.mode {
            EditorMode::Idle => return Err(EditorError::NotOpen),
            EditorMode::Creating => {
                let address = self.draft.address.trim();
                if address.is_empty() {
                    return Err(EditorError::Validation(NoteValidationError::EmptyAddress));
                }
                let note = Note::new(address, &patch.title, &patch.content, patch.tags);
                CommitOutcome::Created(store.add(note)?)
            }
            EditorMode::Editing { note_id } => match store.update(note_id, patch)? {
                Some(note) => CommitOutcome::Updated(note.id.clone()),
                None => CommitOutcome::Missing(note_id.clone()),
            },
        };

        debug!("event=editor_commit module=editor status=ok");
        self.reset();
        Ok(outcome)
    }

    fn validated_patch(&self) -> Result<NotePatch, EditorError> {
        if self.mode == EditorMode::Idle {
            return Err(EditorError::NotOpen);
        }
        let patch = NotePatch {
            title: self.draft.title.trim().to_string(),
            content: self.draft.content.trim().to_string(),
            tags: parse_tags(&self.draft.tags),
        };
        patch.validate().map_err(EditorError::Validation)?;
        Ok(patch)
    }

    fn reset(&mut self) {
        self.mode = EditorMode::Idle;
        self.draft = NoteDraft::default();
    }
}
