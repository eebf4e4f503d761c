//! Cart route handlers.
//!
//! The cart lives in the visitor's session; no cart rows exist in the
//! database until checkout (out of scope here).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;

use waterlife_core::ProductId;
use waterlife_core::models::{Cart, CartItem};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::session_keys;
use crate::state::AppState;

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub slug: String,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Remove-from-cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

/// Cart line display data.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_id: i32,
    pub slug: String,
    pub title: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub unit_count: u32,
}

/// Read the cart out of the session, defaulting to empty.
async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the cart back to the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Display the cart page.
///
/// # Errors
///
/// Returns `AppError` if the session cannot be read.
pub async fn show(session: Session) -> Result<CartTemplate> {
    let cart = load_cart(&session).await?;

    let lines = cart
        .items
        .iter()
        .map(|item| CartLineView {
            product_id: item.product_id.as_i32(),
            slug: item.slug.clone(),
            title: item.title.clone(),
            unit_price: item.unit_price.display(),
            quantity: item.quantity,
            line_total: item.line_total().display(),
        })
        .collect();

    Ok(CartTemplate {
        lines,
        total: cart.total().display(),
        unit_count: cart.unit_count(),
    })
}

/// Add a product to the cart, merging quantity onto an existing line.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no active product has this slug.
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let quantity = form.quantity.unwrap_or(1).clamp(1, 99);

    let product = CatalogRepository::new(state.pool())
        .get_by_slug(&form.slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product: {}", form.slug)))?;

    let mut cart = load_cart(&session).await?;

    if let Some(line) = cart
        .items
        .iter_mut()
        .find(|item| item.product_id == product.id)
    {
        line.quantity = (line.quantity + quantity).min(99);
    } else {
        cart.items.push(CartItem {
            product_id: product.id,
            slug: product.slug.clone(),
            title: product.title.clone(),
            unit_price: product.price,
            quantity,
        });
    }

    save_cart(&session, &cart).await?;
    tracing::debug!(product = %product.slug, quantity, "added to cart");

    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
///
/// Removing a product that is not in the cart is a no-op.
///
/// # Errors
///
/// Returns `AppError` if the session cannot be read or written.
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let product_id = ProductId::new(form.product_id);

    let mut cart = load_cart(&session).await?;
    cart.items.retain(|item| item.product_id != product_id);
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}
