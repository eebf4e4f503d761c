//! Contact message repository.

use sqlx::PgPool;

use waterlife_core::ContactMessageId;

use super::RepositoryError;

/// Repository for contact form submissions.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a contact form submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        message: &str,
    ) -> Result<ContactMessageId, RepositoryError> {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO storefront.contact_message (name, email, phone, message) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(message)
        .fetch_one(self.pool)
        .await?;

        Ok(ContactMessageId::new(id))
    }
}
