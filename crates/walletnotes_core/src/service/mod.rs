//! Use-case layer over the notes store.
//!
//! # Responsibility
//! - Hold transient editor state and commit it through the store.
//! - Compose store, editor and filters into a host-facing session.

pub mod editor;
pub mod session;
