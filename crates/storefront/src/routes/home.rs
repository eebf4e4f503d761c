//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::products::ProductView;
use crate::state::{AppState, CatalogCacheKey};

/// Number of featured products on the home page.
const FEATURED_COUNT: i64 = 8;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub current_email: Option<String>,
    pub featured_products: Vec<ProductView>,
}

/// Display the home page.
///
/// Featured products come from the catalog cache so the home page stays
/// cheap under load.
///
/// # Errors
///
/// Returns `AppError` if the catalog cannot be read.
pub async fn home(
    OptionalAuth(user): OptionalAuth,
    State(state): State<AppState>,
) -> Result<HomeTemplate> {
    let repo = CatalogRepository::new(state.pool());

    let products = state
        .catalog_cache()
        .try_get_with(CatalogCacheKey::Featured, async {
            repo.list_active(FEATURED_COUNT, 0)
                .await
                .map(std::sync::Arc::new)
        })
        .await
        .map_err(|e| AppError::Internal(format!("catalog read failed: {e}")))?;

    Ok(HomeTemplate {
        current_email: user.map(|u| u.email.to_string()),
        featured_products: products.iter().map(ProductView::from).collect(),
    })
}
