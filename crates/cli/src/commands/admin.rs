//! Admin allow-list tools.

use waterlife_admin::services::auth::is_admin_email;
use waterlife_core::AdminAllowList;

/// Evaluate the allow-list gate for `email` against the current environment.
///
/// Reads `ADMIN_ALLOWED_EMAILS` exactly the way the admin binary does, so the
/// answer here matches what a deploy with this environment would decide.
#[must_use]
pub fn check(email: &str) -> bool {
    dotenvy::dotenv().ok();

    let raw = std::env::var("ADMIN_ALLOWED_EMAILS").unwrap_or_default();
    let allow_list = AdminAllowList::parse(&raw);

    tracing::info!(
        configured = allow_list.len(),
        "loaded admin allow-list from environment"
    );

    let is_admin = is_admin_email(Some(email), &allow_list);

    if is_admin {
        tracing::info!(email, "ADMIT: email is on the admin allow-list");
    } else {
        tracing::info!(email, "DENY: email is not on the admin allow-list");
    }

    is_admin
}
