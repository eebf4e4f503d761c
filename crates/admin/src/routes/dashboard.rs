//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::db::{ContactRepository, ProductRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// A recent contact message, as shown on the dashboard.
#[derive(Debug, Clone)]
pub struct ContactMessageView {
    pub name: String,
    pub email: String,
    pub message: String,
    pub received: String,
}

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_email: String,
    pub product_count: i64,
    pub category_count: i64,
    pub manufacturer_count: i64,
    pub recent_messages: Vec<ContactMessageView>,
}

/// Display the dashboard.
///
/// # Errors
///
/// Returns `AppError` if the database cannot be read.
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<DashboardTemplate> {
    let (product_count, category_count, manufacturer_count) =
        ProductRepository::new(state.pool()).counts().await?;

    let recent_messages = ContactRepository::new(state.pool())
        .list_recent(10)
        .await?
        .into_iter()
        .map(|m| ContactMessageView {
            name: m.name,
            email: m.email,
            message: m.message,
            received: m.created_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    Ok(DashboardTemplate {
        admin_email: admin.email.to_string(),
        product_count,
        category_count,
        manufacturer_count,
        recent_messages,
    })
}
