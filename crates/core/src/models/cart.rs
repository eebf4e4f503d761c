//! Session-resident cart shapes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price, ProductId};

/// A single line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product slug, for linking back to the product page.
    pub slug: String,
    /// Product title at the time it was added.
    pub title: String,
    /// Unit price at the time it was added.
    pub unit_price: Price,
    /// Quantity, always >= 1.
    pub quantity: u32,
}

impl CartItem {
    /// Price for this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(
            self.unit_price.amount * Decimal::from(self.quantity),
            self.unit_price.currency_code,
        )
    }
}

/// The visitor's cart, stored in the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines, in insertion order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of all line totals.
    ///
    /// An empty cart totals to zero USD.
    #[must_use]
    pub fn total(&self) -> Price {
        let currency = self
            .items
            .first()
            .map_or(CurrencyCode::USD, |item| item.unit_price.currency_code);
        let amount = self
            .items
            .iter()
            .map(|item| item.line_total().amount)
            .sum();
        Price::new(amount, currency)
    }

    /// True if the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i32, cents: i64, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            slug: format!("product-{id}"),
            title: format!("Product {id}"),
            unit_price: Price::from_cents(cents, CurrencyCode::USD),
            quantity,
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item(1, 1250, 3).line_total().display(), "$37.50");
    }

    #[test]
    fn test_cart_total_and_count() {
        let cart = Cart {
            items: vec![item(1, 1999, 2), item(2, 500, 1)],
        };
        assert_eq!(cart.unit_count(), 3);
        assert_eq!(cart.total().display(), "$44.98");
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.total().display(), "$0.00");
    }
}
