//! Integration tests for WaterLife.
//!
//! These tests exercise the library crates directly - no HTTP server or
//! database is required:
//!
//! - `tests/legacy_storage.rs` - the one-time client-storage migrator,
//!   driven through an in-memory store
//! - `tests/admin_gate.rs` - the admin allow-list gate and its fixed
//!   rejection payloads

#![cfg_attr(not(test), forbid(unsafe_code))]
