//! WaterLife Core - Shared types library.
//!
//! This crate provides common types used across all WaterLife components:
//! - `storefront` - Public-facing e-commerce site
//! - `admin` - Internal administration panel (VPN-only)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, statuses,
//!   and the admin email allow-list
//! - [`models`] - Data-transfer shapes shared between the binaries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use types::*;
