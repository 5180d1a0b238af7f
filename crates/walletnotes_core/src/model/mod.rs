//! Domain model for wallet notes.
//!
//! # Responsibility
//! - Define the canonical note record and its edit patch.
//! - Keep tag parsing rules in one place for editor and FFI callers.
//!
//! # Invariants
//! - Every note is identified by an immutable `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
