//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use waterlife_core::models::User;
use waterlife_core::{Email, UserId};

use super::RepositoryError;

/// Database row for a storefront user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    email_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(User {
            id: UserId::new(self.id),
            email,
            email_verified: self.email_verified,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the email in the database is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, email_verified, created_at, updated_at \
             FROM storefront.user WHERE lower(email) = lower($1)",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
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

        let user = UserRow {
            id,
            email,
            email_verified,
            created_at,
            updated_at,
        }
        .into_user()?;

        Ok(Some((user, hash)))
    }

    /// Create a new user with an email and password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO storefront.user (email, password_hash) VALUES ($1, $2) \
             RETURNING id, email, email_verified, created_at, updated_at",
        )
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Conflict(format!("email already registered: {email}"))
            }
            _ => RepositoryError::Database(e),
        })?;

        row.into_user()
    }
}
