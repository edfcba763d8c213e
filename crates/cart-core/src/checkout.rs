//! # Checkout Flow
//!
//! Validates a cart plus shipping details and hands the order to an
//! `OrderProcessor`. Three terminal outcomes:
//!
//! | Condition | Processor called | View | State |
//! |-----------|------------------|------|-------|
//! | cart has no lines | no | `""` (form) | invalid |
//! | shipping state has errors | no | `""` (form) | invalid |
//! | otherwise | once | `"Completed"` | valid |

use crate::cart::Cart;
use crate::error::CartResult;
use crate::processor::OrderProcessor;
use crate::shipping::ShippingDetails;
use crate::validation::ModelState;
use serde::Serialize;
use tracing::{debug, info};

/// View shown after an order has been submitted
pub const COMPLETED_VIEW: &str = "Completed";

/// Default view name: redisplay the input form
pub const DEFAULT_VIEW: &str = "";

/// Model-level message recorded when checking out an empty cart
pub const EMPTY_CART_MESSAGE: &str = "Sorry, your cart is empty!";

/// Why a checkout was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutRejection {
    /// The cart had no lines
    EmptyCart,
    /// Shipping details failed field validation
    InvalidShippingDetails,
}

/// Terminal state of one checkout attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutOutcome {
    Rejected(CheckoutRejection),
    Completed,
}

/// Outcome plus the validation state to render with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutResult {
    pub outcome: CheckoutOutcome,
    pub model_state: ModelState,
}

impl CheckoutResult {
    /// View to render for this outcome
    pub fn view_name(&self) -> &'static str {
        match self.outcome {
            CheckoutOutcome::Completed => COMPLETED_VIEW,
            CheckoutOutcome::Rejected(_) => DEFAULT_VIEW,
        }
    }

    /// True when the order was submitted
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, CheckoutOutcome::Completed)
    }
}

/// Run checkout for `cart`.
///
/// `model_state` carries the field errors already collected for
/// `shipping_details`. The empty-cart check runs first and adds its own
/// model-level error; either condition blocks processing. On success the
/// cart is cleared after the processor returns. Processor errors are
/// propagated and leave the cart untouched.
pub fn checkout<P>(
    cart: &mut Cart,
    shipping_details: &ShippingDetails,
    mut model_state: ModelState,
    processor: &P,
) -> CartResult<CheckoutResult>
where
    P: OrderProcessor + ?Sized,
{
    let rejection = if cart.is_empty() {
        model_state.add_model_error(EMPTY_CART_MESSAGE);
        Some(CheckoutRejection::EmptyCart)
    } else if !model_state.is_valid() {
        Some(CheckoutRejection::InvalidShippingDetails)
    } else {
        None
    };

    if let Some(rejection) = rejection {
        debug!(
            ?rejection,
            errors = model_state.error_count(),
            "Checkout rejected"
        );
        return Ok(CheckoutResult {
            outcome: CheckoutOutcome::Rejected(rejection),
            model_state,
        });
    }

    info!(
        processor = processor.processor_name(),
        lines = cart.line_count(),
        total = %cart.compute_total_value(),
        "Submitting order"
    );

    processor.process_order(cart, shipping_details)?;
    cart.clear();

    Ok(CheckoutResult {
        outcome: CheckoutOutcome::Completed,
        model_state,
    })
}
