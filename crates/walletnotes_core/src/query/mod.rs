//! Derived, read-only views over the note collection.
//!
//! # Responsibility
//! - Filter notes by address, free text and tag.
//! - Derive the distinct address/tag sets and collection statistics.
//!
//! # Invariants
//! - Nothing in this module mutates notes or touches storage.

pub mod filter;
