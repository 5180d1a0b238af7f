//! Collection ownership over the storage port.
//!
//! # Responsibility
//! - Keep the single in-memory note collection and persist it on mutation.
//! - Isolate serialization details from editor/session orchestration.
//!
//! # Invariants
//! - Store writes validate records before persistence.
//! - No other module writes the notes slot directly.

pub mod note_store;
