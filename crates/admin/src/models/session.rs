//! Session-related types.

use serde::{Deserialize, Serialize};

use waterlife_core::{Email, UserId};

/// Session-stored admin identity.
///
/// Holding a `CurrentAdmin` in the session proves the user passed the
/// allow-list gate at login time; `RequireAdmin` still re-checks the list
/// on every request so a removed admin is locked out at the next restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's user ID in the shared user table.
    pub id: UserId,
    /// Admin's email address.
    pub email: Email,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
