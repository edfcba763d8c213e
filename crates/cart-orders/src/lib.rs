//! # cart-orders
//!
//! Order processors for the cart checkout flow.
//!
//! This crate provides two `OrderProcessor` implementations:
//!
//! 1. **LoggingOrderProcessor** - logs each order notification
//!    - No side effects beyond tracing output
//!    - Best for: development, demos
//!
//! 2. **FileOrderProcessor** - writes each notification to a pickup directory
//!    - One `.eml` text file per order
//!    - Best for: handing orders to a mail relay or fulfilment job
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cart_orders::OrderProcessorConfig;
//! use cart_core::CartController;
//!
//! // Select processor from environment
//! let processor = OrderProcessorConfig::from_env()?.build();
//!
//! let controller = CartController::new(repository, processor);
//! ```

pub mod config;
pub mod processors;
pub mod receipt;

// Re-exports
pub use config::OrderProcessorConfig;
pub use processors::{FileOrderProcessor, LoggingOrderProcessor};
pub use receipt::OrderReceipt;
