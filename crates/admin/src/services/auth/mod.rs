//! Admin authentication and authorization.
//!
//! Authentication is email + password against the shared user table.
//! Authorization is the email allow-list: only addresses named in
//! `ADMIN_ALLOWED_EMAILS` may hold an admin session, and the check is
//! repeated on every request by the `RequireAdmin` extractor.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use sqlx::PgPool;

use waterlife_core::{AdminAllowList, Email};
use waterlife_core::models::User;

use crate::db::users::UserRepository;

/// Decide whether `email` belongs to a configured administrator.
///
/// Fails closed in every ambiguous case:
/// - `None` or blank input (no authenticated user) is never an admin.
/// - An empty allow-list means "no admins configured" and denies everyone;
///   a warning is logged because that is almost always a deployment mistake.
///
/// Matching is case-insensitive and trim-tolerant.
#[must_use]
pub fn is_admin_email(email: Option<&str>, allow_list: &AdminAllowList) -> bool {
    let Some(email) = email else {
        return false;
    };

    let email = email.trim();
    if email.is_empty() {
        return false;
    }

    if allow_list.is_empty() {
        tracing::warn!("ADMIN_ALLOWED_EMAILS is empty; denying all admin access");
        return false;
    }

    allow_list.contains(email)
}

/// Admin login service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new admin auth service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Verify credentials and the allow-list gate in one step.
    ///
    /// The gate runs *after* password verification so that a rejected login
    /// cannot be used to probe which emails are admins.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    /// Returns `AuthError::NotAdmin` if credentials are valid but the email
    /// is not on the allow-list.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        allow_list: &AdminAllowList,
    ) -> Result<User, AuthError> {
        let email = Email::parse(email.trim())?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        if !is_admin_email(Some(user.email.as_str()), allow_list) {
            tracing::info!(email = %user.email, "login refused: not on admin allow-list");
            return Err(AuthError::NotAdmin);
        }

        Ok(user)
    }
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_email_is_denied() {
        let list = AdminAllowList::parse("admin@example.com");
        assert!(!is_admin_email(None, &list));
        assert!(!is_admin_email(Some(""), &list));
        assert!(!is_admin_email(Some("   "), &list));
    }

    #[test]
    fn test_empty_allow_list_denies_everyone() {
        let list = AdminAllowList::default();
        assert!(!is_admin_email(Some("anything@x.com"), &list));
    }

    #[test]
    fn test_membership_is_case_insensitive() {
        let list = AdminAllowList::parse("admin@example.com");
        assert!(is_admin_email(Some("Admin@Example.com"), &list));
        assert!(is_admin_email(Some("admin@example.com"), &list));
    }

    #[test]
    fn test_non_member_is_denied() {
        let list = AdminAllowList::parse("a@x.com, b@y.com");
        assert!(is_admin_email(Some("b@y.com"), &list));
        assert!(!is_admin_email(Some("c@z.com"), &list));
    }
}
