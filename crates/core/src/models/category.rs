//! Category data-transfer shape.

use serde::{Deserialize, Serialize};

use crate::types::CategoryId;

/// A catalog category (e.g. "Filtration", "Lighting").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// URL-safe identifier.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Optional short description shown on the category page.
    pub description: Option<String>,
}
