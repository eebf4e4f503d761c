//! Application services for the admin panel.

pub mod auth;

pub use auth::{AuthError, AuthService, is_admin_email};
