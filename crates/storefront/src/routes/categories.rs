//! Category route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Category display data for templates.
#[derive(Debug, Clone)]
pub struct CategoryView {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
}

/// Category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub categories: Vec<CategoryView>,
}

/// Category detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/show.html")]
pub struct CategoryShowTemplate {
    pub category: CategoryView,
    pub products: Vec<ProductView>,
}

/// Display all categories.
///
/// # Errors
///
/// Returns `AppError` if the catalog cannot be read.
pub async fn index(State(state): State<AppState>) -> Result<CategoriesIndexTemplate> {
    let categories = CatalogRepository::new(state.pool())
        .list_categories()
        .await?
        .into_iter()
        .map(|c| CategoryView {
            slug: c.slug,
            name: c.name,
            description: c.description,
        })
        .collect();

    Ok(CategoriesIndexTemplate { categories })
}

/// Display a category and its active products.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no category has this slug.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<CategoryShowTemplate> {
    let repo = CatalogRepository::new(state.pool());

    let category = repo
        .get_category_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category: {slug}")))?;

    let products = repo
        .list_by_category(category.id)
        .await?
        .iter()
        .map(ProductView::from)
        .collect();

    Ok(CategoryShowTemplate {
        category: CategoryView {
            slug: category.slug,
            name: category.name,
            description: category.description,
        },
        products,
    })
}
