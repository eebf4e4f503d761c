//! Admin authentication route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, NOT_ADMIN};
use crate::filters;
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> LoginTemplate {
    LoginTemplate { error: query.error }
}

/// Handle an admin login submission.
///
/// Password verification runs first; the allow-list gate decides whether a
/// valid user may hold an admin session. Gate rejections surface the fixed
/// 403 payload so the caller sees exactly why access was refused.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());
    let allow_list = &state.config().admin_allowed_emails;

    match auth.login(&form.email, &form.password, allow_list).await {
        Ok(user) => {
            let admin = CurrentAdmin {
                id: user.id,
                email: user.email,
            };
            if let Err(e) = set_current_admin(&session, &admin).await {
                return AppError::Session(e).into_response();
            }
            tracing::info!(admin = %admin.email, "admin logged in");
            Redirect::to("/").into_response()
        }
        Err(AuthError::NotAdmin) => NOT_ADMIN.into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "admin login failed");
            Redirect::to("/auth/login?error=Invalid+email+or+password").into_response()
        }
    }
}

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_admin(&session).await {
        tracing::warn!(error = %e, "failed to clear session on logout");
    }
    Redirect::to("/auth/login").into_response()
}
