//! Host-facing bindings for the wallet notes core.

pub mod api;
