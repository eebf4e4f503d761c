//! Catalog repository: product CRUD plus the category/manufacturer lookups
//! the product forms need.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use waterlife_core::models::{Category, Manufacturer, Product};
use waterlife_core::{CategoryId, CurrencyCode, ManufacturerId, Price, ProductId, ProductStatus};

use super::RepositoryError;

/// Database row for a catalog product.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    slug: String,
    title: String,
    description: String,
    price_amount: Decimal,
    currency: String,
    image_url: Option<String>,
    category_id: Option<i32>,
    manufacturer_id: Option<i32>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, RepositoryError> {
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

/// Validated input for creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub price_amount: Decimal,
    pub currency: CurrencyCode,
    pub image_url: Option<String>,
    pub category_id: Option<CategoryId>,
    pub manufacturer_id: Option<ManufacturerId>,
    pub status: ProductStatus,
}

/// Repository for catalog writes and admin-side reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products regardless of status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if a row holds an unknown status/currency.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM catalog.product ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Fetch a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `DataCorruption` if the row holds an unknown status/currency.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM catalog.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO catalog.product \
             (slug, title, description, price_amount, currency, image_url, \
              category_id, manufacturer_id, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price_amount)
        .bind(input.currency.code())
        .bind(&input.image_url)
        .bind(input.category_id)
        .bind(input.manufacturer_id)
        .bind(input.status.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(conflict_on_unique)?;

        row.into_product()
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID.
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE catalog.product SET \
             slug = $2, title = $3, description = $4, price_amount = $5, \
             currency = $6, image_url = $7, category_id = $8, \
             manufacturer_id = $9, status = $10, updated_at = now() \
             WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price_amount)
        .bind(input.currency.code())
        .bind(&input.image_url)
        .bind(input.category_id)
        .bind(input.manufacturer_id)
        .bind(input.status.as_str())
        .fetch_optional(self.pool)
        .await
        .map_err(conflict_on_unique)?;

        row.ok_or(RepositoryError::NotFound)?.into_product()
    }

    /// Delete a product.
    ///
    /// # Returns
    ///
    /// Returns `true` if the product was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all categories, alphabetically (for the product form dropdown).
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

    /// List all manufacturers, alphabetically (for the product form dropdown).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_manufacturers(&self) -> Result<Vec<Manufacturer>, RepositoryError> {
        let rows: Vec<(i32, String, String, Option<String>, Option<String>)> = sqlx::query_as(
            "SELECT id, slug, name, country, website FROM catalog.manufacturer ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, slug, name, country, website)| Manufacturer {
                id: ManufacturerId::new(id),
                slug,
                name,
                country,
                website,
            })
            .collect())
    }

    /// Count rows per catalog table (for the dashboard).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn counts(&self) -> Result<(i64, i64, i64), RepositoryError> {
        let (products,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM catalog.product")
            .fetch_one(self.pool)
            .await?;
        let (categories,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM catalog.category")
            .fetch_one(self.pool)
            .await?;
        let (manufacturers,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM catalog.manufacturer")
            .fetch_one(self.pool)
            .await?;

        Ok((products, categories, manufacturers))
    }
}

/// Map a unique violation onto `RepositoryError::Conflict`.
fn conflict_on_unique(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict("slug already in use".to_string())
        }
        _ => RepositoryError::Database(e),
    }
}
