//! # Cart Error Types
//!
//! Typed error handling for the cart engine.
//! Cart mutations and checkout return `Result<T, CartError>`.
//!
//! Checkout rejections (empty cart, invalid shipping details) are not
//! errors: they are reported through `ModelState` and `CheckoutOutcome`.

use crate::product::ProductId;
use thiserror::Error;

/// Core error type for all cart operations
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantity of zero passed to `add_item`
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: ProductId, quantity: u32 },

    /// Adding to an existing line would overflow its quantity
    #[error("Quantity overflow for product {product_id}")]
    QuantityOverflow { product_id: ProductId },

    /// The order processor failed; never retried here
    #[error("Order processing failed [{processor}]: {message}")]
    OrderProcessing { processor: String, message: String },

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Product catalog could not be loaded or parsed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CartError {
    /// Build an `OrderProcessing` error
    pub fn processing(processor: impl Into<String>, message: impl ToString) -> Self {
        CartError::OrderProcessing {
            processor: processor.into(),
            message: message.to_string(),
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CartError::InvalidQuantity { .. } => 400,
            CartError::QuantityOverflow { .. } => 400,
            CartError::OrderProcessing { .. } => 502,
            CartError::Configuration(_) => 500,
            CartError::Catalog(_) => 500,
            CartError::Internal(_) => 500,
        }
    }
}

/// Result type alias for cart operations
pub type CartResult<T> = Result<T, CartError>;
