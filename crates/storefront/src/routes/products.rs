//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use waterlife_core::models::Product;

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::{AppState, CatalogCacheKey};

/// Products shown per listing page.
const PER_PAGE: i64 = 12;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image_url: product.image_url.clone(),
        }
    }
}

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub current_page: u32,
    pub total_pages: u32,
    pub has_more_pages: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub manufacturer_name: Option<String>,
    pub related_products: Vec<ProductView>,
}

/// Display product listing page.
///
/// # Errors
///
/// Returns `AppError` if the catalog cannot be read.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<ProductsIndexTemplate> {
    let current_page = query.page.unwrap_or(1).max(1);
    let offset = i64::from(current_page - 1) * PER_PAGE;

    let repo = CatalogRepository::new(state.pool());

    let products = state
        .catalog_cache()
        .try_get_with(CatalogCacheKey::ProductPage(current_page), async {
            repo.list_active(PER_PAGE, offset).await.map(std::sync::Arc::new)
        })
        .await
        .map_err(|e| AppError::Internal(format!("catalog read failed: {e}")))?;

    let total = repo.count_active().await?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_pages = ((total.max(0) as u64).div_ceil(PER_PAGE as u64) as u32).max(1);

    Ok(ProductsIndexTemplate {
        products: products.iter().map(ProductView::from).collect(),
        current_page,
        total_pages,
        has_more_pages: current_page < total_pages,
    })
}

/// Display product detail page.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no active product has this slug.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ProductShowTemplate> {
    let repo = CatalogRepository::new(state.pool());

    let product = repo
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product: {slug}")))?;

    let manufacturer_name = match product.manufacturer_id {
        Some(id) => repo.get_manufacturer(id).await?.map(|m| m.name),
        None => None,
    };

    let related_products = match product.category_id {
        Some(category_id) => repo
            .list_by_category(category_id)
            .await?
            .iter()
            .filter(|p| p.id != product.id)
            .take(4)
            .map(ProductView::from)
            .collect(),
        None => Vec::new(),
    };

    Ok(ProductShowTemplate {
        product: ProductView::from(&product),
        manufacturer_name,
        related_products,
    })
}
