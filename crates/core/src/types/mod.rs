//! Core types for WaterLife.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod allowlist;
pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use allowlist::AdminAllowList;
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use status::ProductStatus;
