//! # Request Handlers
//!
//! Axum request handlers mapping HTTP onto `CartController` actions.
//! Carts live in the session store and are addressed by session id.

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use cart_core::{
    CartError, CartSummary, Decimal, ModelState, Product, ProductId, ProductRepository,
    RedirectToRoute, ShippingDetails,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use uuid::Uuid;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Product listing filter
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Return URL carried through cart pages
#[derive(Debug, Deserialize)]
pub struct ReturnUrlQuery {
    #[serde(default)]
    pub return_url: Option<String>,
}

/// Add or remove a product
#[derive(Debug, Deserialize)]
pub struct CartItemRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub return_url: Option<String>,
}

/// New session cart
#[derive(Debug, Serialize)]
pub struct CreateCartResponse {
    pub cart_id: Uuid,
}

/// Cart page
#[derive(Debug, Serialize)]
pub struct CartIndexResponse {
    pub cart_id: Uuid,
    pub lines: Vec<CartLineView>,
    pub total_value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

/// One cart line for display
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub subtotal: Decimal,
}

/// Checkout result
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// `""` redisplays the form, `"Completed"` confirms the order
    pub view: &'static str,
    pub valid: bool,
    pub errors: ModelState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_details: Option<ShippingDetails>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn cart_error_to_response(err: CartError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

fn cart_not_found(cart_id: Uuid) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!("Cart not found: {}", cart_id), 404)),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cart-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List products, optionally filtered by category
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> impl IntoResponse {
    let products: Vec<Product> = match query.category.as_deref() {
        Some(category) => state.catalog.by_category(category),
        None => state.catalog.products(),
    };
    Json(serde_json::json!({
        "products": products,
        "count": products.len()
    }))
}

/// List catalog categories
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "categories": state.catalog.categories() }))
}

/// Start a session cart
#[instrument(skip(state))]
pub async fn create_cart(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateCartResponse>), ApiError> {
    let cart_id = state.carts.create().map_err(cart_error_to_response)?;
    info!(%cart_id, "Created cart");
    Ok((StatusCode::CREATED, Json(CreateCartResponse { cart_id })))
}

/// End a session and drop its cart
#[instrument(skip(state))]
pub async fn delete_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.carts.remove(cart_id).map_err(cart_error_to_response)? {
        return Err(cart_not_found(cart_id));
    }
    info!(%cart_id, "Deleted cart");
    Ok(StatusCode::NO_CONTENT)
}

/// Show cart contents
#[instrument(skip(state, query))]
pub async fn view_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Query(query): Query<ReturnUrlQuery>,
) -> Result<Json<CartIndexResponse>, ApiError> {
    state
        .carts
        .with_cart(cart_id, |cart| {
            let view = state.controller.index(cart, query.return_url);
            CartIndexResponse {
                cart_id,
                lines: view
                    .model
                    .cart
                    .lines()
                    .iter()
                    .map(|line| CartLineView {
                        product_id: line.product.id,
                        name: line.product.name.clone(),
                        quantity: line.quantity,
                        price: line.product.price,
                        subtotal: line.subtotal(),
                    })
                    .collect(),
                total_value: view.model.cart.compute_total_value(),
                return_url: view.model.return_url,
            }
        })
        .map_err(cart_error_to_response)?
        .map(Json)
        .ok_or_else(|| cart_not_found(cart_id))
}

/// Item count and total for the cart widget
pub async fn cart_summary(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> Result<Json<CartSummary>, ApiError> {
    state
        .carts
        .with_cart(cart_id, |cart| state.controller.summary(cart))
        .map_err(cart_error_to_response)?
        .map(Json)
        .ok_or_else(|| cart_not_found(cart_id))
}

/// Add one of a product to the cart
#[instrument(skip(state, request), fields(product_id = %request.product_id))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(request): Json<CartItemRequest>,
) -> Result<Json<RedirectToRoute>, ApiError> {
    let redirect = state
        .carts
        .with_cart(cart_id, |cart| {
            state
                .controller
                .add_to_cart(cart, request.product_id, request.return_url)
        })
        .map_err(cart_error_to_response)?
        .ok_or_else(|| cart_not_found(cart_id))?
        .map_err(cart_error_to_response)?;

    Ok(Json(redirect))
}

/// Remove a product's line from the cart
#[instrument(skip(state, request), fields(product_id = %request.product_id))]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(request): Json<CartItemRequest>,
) -> Result<Json<RedirectToRoute>, ApiError> {
    state
        .carts
        .with_cart(cart_id, |cart| {
            state
                .controller
                .remove_from_cart(cart, request.product_id, request.return_url)
        })
        .map_err(cart_error_to_response)?
        .map(Json)
        .ok_or_else(|| cart_not_found(cart_id))
}

/// Blank shipping form
pub async fn checkout_form(State(state): State<AppState>) -> impl IntoResponse {
    let view = state.controller.checkout_form();
    Json(view.model)
}

/// Validate shipping details and submit the order
#[instrument(skip(state, shipping_details))]
pub async fn checkout(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(shipping_details): Json<ShippingDetails>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let mut model_state = ModelState::new();
    shipping_details.validate(&mut model_state);

    // The processor may block on I/O; only this session's cart is locked
    let carts = state.carts.clone();
    let controller = state.controller.clone();
    let view = tokio::task::spawn_blocking(move || {
        carts.with_cart(cart_id, |cart| {
            controller.checkout(cart, shipping_details, model_state)
        })
    })
    .await
    .map_err(|e| cart_error_to_response(CartError::Internal(format!("checkout task: {}", e))))?
    .map_err(cart_error_to_response)?
    .ok_or_else(|| cart_not_found(cart_id))?
    .map_err(|e| {
        error!("Checkout failed: {}", e);
        cart_error_to_response(e)
    })?;

    info!(
        view = view.view_name,
        valid = view.model_state.is_valid(),
        "Checkout handled"
    );

    Ok(Json(CheckoutResponse {
        view: view.view_name,
        valid: view.model_state.is_valid(),
        errors: view.model_state,
        shipping_details: view.model,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400).with_details("more");
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
        assert_eq!(err.details.as_deref(), Some("more"));
    }

    #[test]
    fn test_cart_error_conversion() {
        let err = CartError::InvalidQuantity {
            product_id: ProductId(3),
            quantity: 0,
        };
        let (status, _json) = cart_error_to_response(err);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _json) = cart_error_to_response(CartError::processing("file", "disk full"));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
