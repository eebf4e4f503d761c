//! Authorization middleware and extractors for admin.
//!
//! `RequireAdmin` is the single gate in front of every admin surface: it
//! checks for an authenticated session *and* re-evaluates the email
//! allow-list on each request.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::{NOT_ADMIN, NOT_AUTHENTICATED};
use crate::models::{CurrentAdmin, session_keys};
use crate::services::auth::is_admin_email;
use crate::state::AppState;

/// Extractor that requires an allow-listed admin.
///
/// If nobody is logged in, HTML requests are redirected to the login page
/// and API requests receive the fixed 401 payload. A logged-in user whose
/// email is no longer on the allow-list receives the fixed 403 payload.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.email)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

/// Error returned when the admin gate rejects a request.
pub enum AdminRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// No authenticated user (for API requests).
    Unauthenticated,
    /// Authenticated, but not on the allow-list.
    Forbidden,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthenticated => NOT_AUTHENTICATED.into_response(),
            Self::Forbidden => NOT_ADMIN.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminRejection::Unauthenticated)?;

        // Get the current admin from the session
        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                let is_api = parts.uri.path().starts_with("/api/");
                if is_api {
                    AdminRejection::Unauthenticated
                } else {
                    AdminRejection::RedirectToLogin
                }
            })?;

        // Re-check the allow-list: sessions outlive configuration changes.
        let allow_list = &state.config().admin_allowed_emails;
        if !is_admin_email(Some(admin.email.as_str()), allow_list) {
            tracing::warn!(email = %admin.email, "session email no longer on admin allow-list");
            return Err(AdminRejection::Forbidden);
        }

        Ok(Self(admin))
    }
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the current admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}
