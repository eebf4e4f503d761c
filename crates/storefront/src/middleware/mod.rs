//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. Session layer (tower-sessions with `PostgreSQL` store)
//! 3. Legacy storage cleanup (one-time per visitor, marker-guarded)
//! 4. Rate limiting (governor, per route group)

pub mod auth;
pub mod legacy_storage;
pub mod rate_limit;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use legacy_storage::legacy_cleanup;
pub use rate_limit::auth_rate_limiter;
pub use session::create_session_layer;
