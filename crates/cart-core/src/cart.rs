//! # Cart Types
//!
//! The session cart: an ordered set of lines, one per distinct product.

use crate::error::{CartError, CartResult};
use crate::product::{Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product and how many of it are in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product (identity decides merging)
    pub product: Product,

    /// Quantity, always positive
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Shopping cart for one user session.
///
/// Lines keep the order in which their product was first added. There is
/// never more than one line per `ProductId`. Deserialized carts are
/// rebuilt through `add_item`, so they hold the same invariants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CartLines")]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// Wire form of a cart before its lines are checked
#[derive(Deserialize)]
struct CartLines {
    lines: Vec<CartLine>,
}

impl TryFrom<CartLines> for Cart {
    type Error = CartError;

    fn try_from(raw: CartLines) -> CartResult<Self> {
        let mut cart = Cart::new();
        for line in raw.lines {
            cart.add_item(&line.product, line.quantity)?;
        }
        Ok(cart)
    }
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` of `product`, merging into an existing line.
    ///
    /// A zero quantity is rejected, as is an increment that would
    /// overflow the line. The cart is unchanged on error.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> CartResult<()> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity {
                product_id: product.id,
                quantity,
            });
        }

        match self.lines.iter_mut().find(|l| l.product.same_identity(product)) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(quantity).ok_or(
                    CartError::QuantityOverflow {
                        product_id: product.id,
                    },
                )?;
            }
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity,
            }),
        }

        Ok(())
    }

    /// Remove the line for `product`, if any
    pub fn remove_line(&mut self, product: &Product) {
        self.lines.retain(|l| !l.product.same_identity(product));
    }

    /// Lines in first-added order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for a product id
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Sum of `price * quantity` over all lines
    pub fn compute_total_value(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Remove all lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Check if cart is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of items across lines
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}
