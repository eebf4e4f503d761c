//! Product data-transfer shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, ManufacturerId, Price, ProductId, ProductStatus};

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// URL-safe identifier, unique within the catalog.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Long-form description (plain text).
    pub description: String,
    /// Current price.
    pub price: Price,
    /// Primary image URL, if any.
    pub image_url: Option<String>,
    /// Owning category, if assigned.
    pub category_id: Option<CategoryId>,
    /// Manufacturer, if known.
    pub manufacturer_id: Option<ManufacturerId>,
    /// Publication status.
    pub status: ProductStatus,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
