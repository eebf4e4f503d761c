//! Read-only catalog repository.
//!
//! The admin binary owns writes to the `catalog` schema; the storefront only
//! ever reads published rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use waterlife_core::models::{Category, Manufacturer, Product};
use waterlife_core::{CategoryId, CurrencyCode, ManufacturerId, Price, ProductId, ProductStatus};

use super::RepositoryError;

/// Database row for a catalog product.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub price_amount: Decimal,
    pub currency: String,
    pub image_url: Option<String>,
    pub category_id: Option<i32>,
    pub manufacturer_id: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductRow {
    /// Map a row to the shared product shape.
    ///
    /// Status and currency are TEXT columns; unknown values mean someone
    /// wrote to the table outside the application.
    pub(crate) fn into_product(self) -> Result<Product, RepositoryError> {
        let status = ProductStatus::parse(&self.status).ok_or_else(|| {
            RepositoryError::DataCorruption(format!("unknown product status: {}", self.status))
        })?;
        let currency = CurrencyCode::parse_code(&self.currency).ok_or_else(|| {
            RepositoryError::DataCorruption(format!("unknown currency code: {}", self.currency))
        })?;

        Ok(Product {
            id: ProductId::new(self.id),
            slug: self.slug,
            title: self.title,
            description: self.description,
            price: Price::new(self.price_amount, currency),
            image_url: self.image_url,
            category_id: self.category_id.map(CategoryId::new),
            manufacturer_id: self.manufacturer_id.map(ManufacturerId::new),
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, slug, title, description, price_amount, currency, \
     image_url, category_id, manufacturer_id, status, created_at, updated_at";

/// Repository for storefront catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a row holds an unknown status/currency.
    pub async fn list_active(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM catalog.product \
             WHERE status = 'active' \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Count active products (for pagination).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_active(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM catalog.product WHERE status = 'active'")
                .fetch_one(self.pool)
                .await?;
        Ok(count)
    }

    /// Fetch an active product by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if the row holds an unknown status/currency.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM catalog.product \
             WHERE slug = $1 AND status = 'active'"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// List active products in a category, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a row holds an unknown status/currency.
    pub async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM catalog.product \
             WHERE category_id = $1 AND status = 'active' \
             ORDER BY created_at DESC"
        ))
        .bind(category_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// List all categories, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows: Vec<(i32, String, String, Option<String>)> = sqlx::query_as(
            "SELECT id, slug, name, description FROM catalog.category ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, slug, name, description)| Category {
                id: CategoryId::new(id),
                slug,
                name,
                description,
            })
            .collect())
    }

    /// Fetch a category by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Category>, RepositoryError> {
        let row: Option<(i32, String, String, Option<String>)> = sqlx::query_as(
            "SELECT id, slug, name, description FROM catalog.category WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id, slug, name, description)| Category {
            id: CategoryId::new(id),
            slug,
            name,
            description,
        }))
    }

    /// Fetch a manufacturer by ID (for the product detail page).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_manufacturer(
        &self,
        id: ManufacturerId,
    ) -> Result<Option<Manufacturer>, RepositoryError> {
        let row: Option<(i32, String, String, Option<String>, Option<String>)> = sqlx::query_as(
            "SELECT id, slug, name, country, website FROM catalog.manufacturer WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id, slug, name, country, website)| Manufacturer {
            id: ManufacturerId::new(id),
            slug,
            name,
            country,
            website,
        }))
    }
}
