//! # Order Processor Trait
//!
//! The capability that finalizes a validated order (persistence, payment,
//! notification). Implementations: logging, pickup-directory files.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    OrderProcessor (trait)                   │
//! │  ├── process_order()                                        │
//! │  └── processor_name()                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                ┌───────────┴───────────┐
//!                │                       │
//!        ┌───────┴───────┐       ┌───────┴───────┐
//!        │    Logging    │       │     File      │
//!        │OrderProcessor │       │OrderProcessor │
//!        └───────────────┘       └───────────────┘
//! ```

use crate::cart::Cart;
use crate::error::CartResult;
use crate::shipping::ShippingDetails;
use std::sync::Arc;

/// Core trait for order processor implementations.
///
/// The checkout flow calls `process_order` at most once per successful
/// checkout, with a non-empty cart. Failures are returned to the caller
/// as-is; the flow neither retries nor swallows them.
pub trait OrderProcessor: Send + Sync {
    /// Finalize the order described by `cart` and `shipping_details`.
    fn process_order(&self, cart: &Cart, shipping_details: &ShippingDetails) -> CartResult<()>;

    /// Get the processor name (for logging).
    fn processor_name(&self) -> &'static str;
}

/// Type alias for a shared order processor (dynamic dispatch)
pub type BoxedOrderProcessor = Arc<dyn OrderProcessor>;
