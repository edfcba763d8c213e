//! # cart-core
//!
//! Core types and traits for the session shopping cart.
//!
//! This crate provides:
//! - `Product`, `ProductCatalog` and the `ProductRepository` lookup trait
//! - `Cart` and `CartLine`, the in-memory cart aggregate
//! - `ShippingDetails` and `ModelState` for checkout form validation
//! - `OrderProcessor` trait for order finalization
//! - `checkout()` flow and the `CartController` actions
//! - `CartError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use cart_core::{Cart, CartController, ModelState, ProductId, ShippingDetails};
//!
//! let controller = CartController::new(repository, processor);
//! let mut cart = Cart::new();
//!
//! controller.add_to_cart(&mut cart, ProductId(1), None)?;
//!
//! let mut state = ModelState::new();
//! details.validate(&mut state);
//! let view = controller.checkout(&mut cart, details, state)?;
//! assert_eq!(view.view_name, "Completed");
//! ```

pub mod cart;
pub mod checkout;
pub mod controller;
pub mod error;
pub mod processor;
pub mod product;
pub mod shipping;
pub mod validation;

// Re-exports for convenience
pub use cart::{Cart, CartLine};
pub use checkout::{
    checkout, CheckoutOutcome, CheckoutRejection, CheckoutResult, COMPLETED_VIEW, DEFAULT_VIEW,
    EMPTY_CART_MESSAGE,
};
pub use controller::{
    CartController, CartIndexViewModel, CartSummary, RedirectToRoute, ViewResult, INDEX_ACTION,
};
pub use error::{CartError, CartResult};
pub use processor::{BoxedOrderProcessor, OrderProcessor};
pub use product::{
    format_money, BoxedProductRepository, Product, ProductCatalog, ProductId, ProductRepository,
};
pub use rust_decimal::Decimal;
pub use shipping::ShippingDetails;
pub use validation::{ModelState, MODEL_KEY};
