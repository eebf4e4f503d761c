//! Manufacturer data-transfer shape.

use serde::{Deserialize, Serialize};

use crate::types::ManufacturerId;

/// A product manufacturer/brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manufacturer {
    /// Unique manufacturer ID.
    pub id: ManufacturerId,
    /// URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// ISO country name, if known.
    pub country: Option<String>,
    /// Manufacturer website, if known.
    pub website: Option<String>,
}
