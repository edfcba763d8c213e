//! # Cart Controller
//!
//! Request-level cart actions. The controller owns no state: the session
//! cart is passed into every action, and the product lookup and order
//! processing capabilities are injected at construction.

use crate::cart::Cart;
use crate::checkout::{self, CheckoutResult, DEFAULT_VIEW};
use crate::error::CartResult;
use crate::processor::BoxedOrderProcessor;
use crate::product::{BoxedProductRepository, ProductId};
use crate::shipping::ShippingDetails;
use crate::validation::ModelState;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

/// Action that renders the cart contents
pub const INDEX_ACTION: &str = "Index";

/// A view to render with its model and validation state
#[derive(Debug, Clone)]
pub struct ViewResult<M> {
    /// `""` means the action's default view
    pub view_name: &'static str,
    pub model: M,
    pub model_state: ModelState,
}

/// Redirect to another controller action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectToRoute {
    pub action: &'static str,
    pub return_url: Option<String>,
}

/// Model for the cart page
#[derive(Debug, Clone, Serialize)]
pub struct CartIndexViewModel<'a> {
    pub cart: &'a Cart,
    pub return_url: Option<String>,
}

/// Compact cart widget model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub item_count: u64,
    pub line_count: usize,
    pub total_value: Decimal,
}

/// Cart actions over injected capabilities
#[derive(Clone)]
pub struct CartController {
    repository: BoxedProductRepository,
    processor: BoxedOrderProcessor,
}

impl CartController {
    /// Create a controller
    pub fn new(repository: BoxedProductRepository, processor: BoxedOrderProcessor) -> Self {
        Self {
            repository,
            processor,
        }
    }

    /// Show the cart
    pub fn index<'a>(
        &self,
        cart: &'a Cart,
        return_url: Option<String>,
    ) -> ViewResult<CartIndexViewModel<'a>> {
        ViewResult {
            view_name: DEFAULT_VIEW,
            model: CartIndexViewModel { cart, return_url },
            model_state: ModelState::new(),
        }
    }

    /// Add one of `product_id` to the cart.
    ///
    /// Unknown ids leave the cart unchanged; the redirect is issued either way.
    pub fn add_to_cart(
        &self,
        cart: &mut Cart,
        product_id: ProductId,
        return_url: Option<String>,
    ) -> CartResult<RedirectToRoute> {
        match self.repository.find(product_id) {
            Some(product) => {
                cart.add_item(&product, 1)?;
                debug!(%product_id, lines = cart.line_count(), "Added to cart");
            }
            None => debug!(%product_id, "Add to cart ignored: unknown product"),
        }

        Ok(RedirectToRoute {
            action: INDEX_ACTION,
            return_url,
        })
    }

    /// Remove the line for `product_id` from the cart
    pub fn remove_from_cart(
        &self,
        cart: &mut Cart,
        product_id: ProductId,
        return_url: Option<String>,
    ) -> RedirectToRoute {
        if let Some(product) = self.repository.find(product_id) {
            cart.remove_line(&product);
            debug!(%product_id, lines = cart.line_count(), "Removed from cart");
        }

        RedirectToRoute {
            action: INDEX_ACTION,
            return_url,
        }
    }

    /// Item count and total for the cart widget
    pub fn summary(&self, cart: &Cart) -> CartSummary {
        CartSummary {
            item_count: cart.item_count(),
            line_count: cart.line_count(),
            total_value: cart.compute_total_value(),
        }
    }

    /// Blank shipping form
    pub fn checkout_form(&self) -> ViewResult<ShippingDetails> {
        ViewResult {
            view_name: DEFAULT_VIEW,
            model: ShippingDetails::default(),
            model_state: ModelState::new(),
        }
    }

    /// Submit the shipping form.
    ///
    /// `model_state` holds the field errors from binding `shipping_details`.
    /// On rejection the form is redisplayed with the submitted details.
    pub fn checkout(
        &self,
        cart: &mut Cart,
        shipping_details: ShippingDetails,
        model_state: ModelState,
    ) -> CartResult<ViewResult<Option<ShippingDetails>>> {
        let result: CheckoutResult =
            checkout::checkout(cart, &shipping_details, model_state, self.processor.as_ref())?;

        let model = if result.is_completed() {
            info!(processor = self.processor.processor_name(), "Order completed");
            None
        } else {
            Some(shipping_details)
        };

        Ok(ViewResult {
            view_name: result.view_name(),
            model,
            model_state: result.model_state,
        })
    }
}
