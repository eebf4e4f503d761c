//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Dashboard (gated)
//! GET  /health                   - Health check
//!
//! # Auth
//! GET  /auth/login               - Login page
//! POST /auth/login               - Login action (password + allow-list gate)
//! POST /auth/logout              - Logout action
//!
//! # Products (gated)
//! GET  /products                 - Product list
//! GET  /products/new             - New product form
//! POST /products                 - Create product
//! GET  /products/{id}/edit       - Edit product form
//! POST /products/{id}           - Update product
//! POST /products/{id}/delete    - Delete product
//! ```

pub mod auth;
pub mod dashboard;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new_form))
        .route("/{id}", post(products::update))
        .route("/{id}/edit", get(products::edit_form))
        .route("/{id}/delete", post(products::delete))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .nest("/products", product_routes())
        .nest("/auth", auth_routes())
}
