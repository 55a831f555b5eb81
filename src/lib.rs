//! Purpose: Shared library crate used by the `dataextract` CLI and tests.
//! Exports: `api` (wrapper surface) and `core` (engine loading, errors, types).
//! Role: Rust binding over the closed-source extract engine; nothing here
//! implements storage, only forwarding and translation.
//! Invariants: All FFI interaction is confined to `core::engine`.
pub mod api;
pub mod core;
