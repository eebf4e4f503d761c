//! Account route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Account overview template.
#[derive(Template, WebTemplate)]
#[template(path = "account.html")]
pub struct AccountTemplate {
    pub email: String,
    pub email_verified: bool,
}

/// Display the account overview.
///
/// The email comes from the session; the verified flag is read fresh so a
/// verification completed in another tab shows up immediately.
///
/// # Errors
///
/// Returns `AppError` if the user row cannot be read.
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<AccountTemplate> {
    let record = UserRepository::new(state.pool())
        .get_by_email(&user.email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user: {}", user.email)))?;

    Ok(AccountTemplate {
        email: record.email.to_string(),
        email_verified: record.email_verified,
    })
}
