//! Product CRUD route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use waterlife_core::models::Product;
use waterlife_core::{CategoryId, CurrencyCode, ManufacturerId, ProductId, ProductStatus};

use crate::db::{ProductInput, ProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Raw product form data.
///
/// All fields arrive as strings (HTML forms have no types); `parse`
/// validates them into a `ProductInput`.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub currency: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub manufacturer_id: String,
    pub status: String,
}

impl ProductForm {
    /// Validate the raw form into repository input.
    fn parse(self) -> std::result::Result<ProductInput, String> {
        let slug = self.slug.trim().to_lowercase();
        if slug.is_empty() || !slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err("slug must be non-empty, lowercase letters, digits and dashes".to_string());
        }

        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err("title is required".to_string());
        }

        let price_amount = self
            .price
            .trim()
            .parse::<Decimal>()
            .map_err(|_| format!("invalid price: {}", self.price))?;
        if price_amount.is_sign_negative() {
            return Err("price cannot be negative".to_string());
        }

        let currency = CurrencyCode::parse_code(self.currency.trim())
            .ok_or_else(|| format!("unknown currency: {}", self.currency))?;

        let status = ProductStatus::parse(self.status.trim())
            .ok_or_else(|| format!("unknown status: {}", self.status))?;

        let category_id = parse_optional_id(&self.category_id)?.map(CategoryId::new);
        let manufacturer_id = parse_optional_id(&self.manufacturer_id)?.map(ManufacturerId::new);

        let image_url = Some(self.image_url.trim().to_string()).filter(|s| !s.is_empty());

        Ok(ProductInput {
            slug,
            title,
            description: self.description.trim().to_string(),
            price_amount,
            currency,
            image_url,
            category_id,
            manufacturer_id,
            status,
        })
    }
}

/// Parse an optional `<select>` value: empty string means "none".
fn parse_optional_id(raw: &str) -> std::result::Result<Option<i32>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| format!("invalid id: {raw}"))
}

// =============================================================================
// View Types
// =============================================================================

/// Product row for the list page.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub price: String,
    pub status: String,
    pub status_class: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let (status, status_class) = match product.status {
            ProductStatus::Active => ("Active", "badge-active"),
            ProductStatus::Draft => ("Draft", "badge-draft"),
            ProductStatus::Archived => ("Archived", "badge-archived"),
        };

        Self {
            id: product.id.as_i32(),
            title: product.title.clone(),
            slug: product.slug.clone(),
            price: product.price.display(),
            status: status.to_string(),
            status_class: status_class.to_string(),
        }
    }
}

/// Dropdown option for the form selects.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub id: i32,
    pub name: String,
    pub selected: bool,
}

/// Editable field values for the form template.
#[derive(Debug, Clone, Default)]
pub struct ProductFormView {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub currency: String,
    pub image_url: String,
    pub status: String,
}

impl From<&Product> for ProductFormView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: format!("{:.2}", product.price.amount),
            currency: product.price.currency_code.code().to_string(),
            image_url: product.image_url.clone().unwrap_or_default(),
            status: product.status.as_str().to_string(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Products list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin_email: String,
    pub products: Vec<ProductView>,
}

/// Product create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub admin_email: String,
    pub heading: String,
    pub action: String,
    pub product: ProductFormView,
    pub categories: Vec<SelectOption>,
    pub manufacturers: Vec<SelectOption>,
    pub statuses: Vec<SelectOption>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product list.
///
/// # Errors
///
/// Returns `AppError` if the catalog cannot be read.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<ProductsIndexTemplate> {
    let products = ProductRepository::new(state.pool()).list().await?;

    Ok(ProductsIndexTemplate {
        admin_email: admin.email.to_string(),
        products: products.iter().map(ProductView::from).collect(),
    })
}

/// Display the new-product form.
///
/// # Errors
///
/// Returns `AppError` if the lookups cannot be read.
pub async fn new_form(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<ProductFormTemplate> {
    let repo = ProductRepository::new(state.pool());

    Ok(ProductFormTemplate {
        admin_email: admin.email.to_string(),
        heading: "New product".to_string(),
        action: "/products".to_string(),
        product: ProductFormView {
            currency: CurrencyCode::USD.code().to_string(),
            status: ProductStatus::Draft.as_str().to_string(),
            ..ProductFormView::default()
        },
        categories: category_options(&repo, None).await?,
        manufacturers: manufacturer_options(&repo, None).await?,
        statuses: status_options(ProductStatus::Draft),
    })
}

/// Create a product.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for invalid form input or a taken slug.
#[instrument(skip(admin, state, form))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let input = form.parse().map_err(AppError::BadRequest)?;

    let product = ProductRepository::new(state.pool())
        .create(&input)
        .await
        .map_err(conflict_to_bad_request)?;

    tracing::info!(admin = %admin.email, product = %product.slug, "product created");
    Ok(Redirect::to("/products"))
}

/// Display the edit form for a product.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no product has this ID.
pub async fn edit_form(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ProductFormTemplate> {
    let repo = ProductRepository::new(state.pool());
    let id = ProductId::new(id);

    let product = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product: {id}")))?;

    Ok(ProductFormTemplate {
        admin_email: admin.email.to_string(),
        heading: format!("Edit: {}", product.title),
        action: format!("/products/{id}"),
        categories: category_options(&repo, product.category_id).await?,
        manufacturers: manufacturer_options(&repo, product.manufacturer_id).await?,
        statuses: status_options(product.status),
        product: ProductFormView::from(&product),
    })
}

/// Update a product.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for invalid form input or a taken slug.
/// Returns `AppError::NotFound` if no product has this ID.
#[instrument(skip(admin, state, form))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    let input = form.parse().map_err(AppError::BadRequest)?;

    let product = ProductRepository::new(state.pool())
        .update(id, &input)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("product: {id}")),
            other => conflict_to_bad_request(other),
        })?;

    tracing::info!(admin = %admin.email, product = %product.slug, "product updated");
    Ok(Redirect::to("/products"))
}

/// Delete a product.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no product has this ID.
#[instrument(skip(admin, state))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    let id = ProductId::new(id);

    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("product: {id}")));
    }

    tracing::info!(admin = %admin.email, product_id = %id, "product deleted");
    Ok(Redirect::to("/products"))
}

// =============================================================================
// Helpers
// =============================================================================

async fn category_options(
    repo: &ProductRepository<'_>,
    selected: Option<CategoryId>,
) -> Result<Vec<SelectOption>> {
    Ok(repo
        .list_categories()
        .await?
        .into_iter()
        .map(|c| SelectOption {
            id: c.id.as_i32(),
            name: c.name,
            selected: selected == Some(c.id),
        })
        .collect())
}

async fn manufacturer_options(
    repo: &ProductRepository<'_>,
    selected: Option<ManufacturerId>,
) -> Result<Vec<SelectOption>> {
    Ok(repo
        .list_manufacturers()
        .await?
        .into_iter()
        .map(|m| SelectOption {
            id: m.id.as_i32(),
            name: m.name,
            selected: selected == Some(m.id),
        })
        .collect())
}

fn status_options(selected: ProductStatus) -> Vec<SelectOption> {
    ProductStatus::ALL
        .into_iter()
        .map(|status| SelectOption {
            id: 0,
            name: status.as_str().to_string(),
            selected: status == selected,
        })
        .collect()
}

/// Surface a slug conflict as user input error, pass everything else through.
fn conflict_to_bad_request(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
        other => AppError::Database(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            slug: "wave-maker-3000".to_string(),
            title: "Wave Maker 3000".to_string(),
            description: "Adjustable flow pump.".to_string(),
            price: "49.99".to_string(),
            currency: "USD".to_string(),
            image_url: String::new(),
            category_id: "2".to_string(),
            manufacturer_id: String::new(),
            status: "active".to_string(),
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let input = valid_form().parse().unwrap();
        assert_eq!(input.slug, "wave-maker-3000");
        assert_eq!(input.category_id, Some(CategoryId::new(2)));
        assert_eq!(input.manufacturer_id, None);
        assert_eq!(input.image_url, None);
        assert_eq!(input.status, ProductStatus::Active);
    }

    #[test]
    fn test_parse_rejects_bad_slug() {
        let mut form = valid_form();
        form.slug = "Not A Slug!".to_string();
        assert!(form.parse().is_err());
    }

    #[test]
    fn test_parse_rejects_bad_price() {
        let mut form = valid_form();
        form.price = "free".to_string();
        assert!(form.parse().is_err());

        let mut form = valid_form();
        form.price = "-5".to_string();
        assert!(form.parse().is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        let mut form = valid_form();
        form.status = "published".to_string();
        assert!(form.parse().is_err());
    }

    #[test]
    fn test_parse_optional_id() {
        assert_eq!(parse_optional_id("").unwrap(), None);
        assert_eq!(parse_optional_id(" 7 ").unwrap(), Some(7));
        assert!(parse_optional_id("seven").is_err());
    }
}
