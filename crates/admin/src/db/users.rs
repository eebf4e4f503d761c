//! User lookups for admin login.
//!
//! Admins are ordinary storefront users whose email is on the allow-list;
//! this repository only reads the shared user table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use waterlife_core::models::User;
use waterlife_core::{Email, UserId};

use super::RepositoryError;

/// Read-only repository over `storefront."user"`.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user together with their password hash, for login.
    ///
    /// Returns `None` if the user does not exist or never set a password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database is invalid.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row: Option<(i32, String, bool, DateTime<Utc>, DateTime<Utc>, Option<String>)> =
            sqlx::query_as(
                "SELECT id, email, email_verified, created_at, updated_at, password_hash \
                 FROM storefront.user WHERE lower(email) = lower($1)",
            )
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        let Some((id, email, email_verified, created_at, updated_at, hash)) = row else {
            return Ok(None);
        };
        let Some(hash) = hash else {
            return Ok(None);
        };

        let email = Email::parse(&email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Some((
            User {
                id: UserId::new(id),
                email,
                email_verified,
                created_at,
                updated_at,
            },
            hash,
        )))
    }
}
