//! # Routes
//!
//! Axum router configuration for the cart API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Catalog:
///   - GET  /api/v1/products[?category=] - List products
///   - GET  /api/v1/categories - List categories
///
/// - Carts:
///   - POST /api/v1/carts - Start a session cart
///   - GET  /api/v1/carts/{cart_id} - Cart contents
///   - DELETE /api/v1/carts/{cart_id} - End the session
///   - GET  /api/v1/carts/{cart_id}/summary - Item count and total
///   - POST /api/v1/carts/{cart_id}/add - Add one of a product
///   - POST /api/v1/carts/{cart_id}/remove - Remove a product's line
///   - GET  /api/v1/checkout - Blank shipping form
///   - POST /api/v1/carts/{cart_id}/checkout - Submit the order
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Catalog
        .route("/products", get(handlers::list_products))
        .route("/categories", get(handlers::list_categories))
        // Session carts
        .route("/carts", post(handlers::create_cart))
        .route("/carts/{cart_id}", get(handlers::view_cart).delete(handlers::delete_cart))
        .route("/carts/{cart_id}/summary", get(handlers::cart_summary))
        .route("/carts/{cart_id}/add", post(handlers::add_to_cart))
        .route("/carts/{cart_id}/remove", post(handlers::remove_from_cart))
        // Checkout
        .route("/checkout", get(handlers::checkout_form))
        .route("/carts/{cart_id}/checkout", post(handlers::checkout));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use cart_core::{
        Cart, CartError, CartResult, Decimal, OrderProcessor, Product, ProductCatalog,
        ShippingDetails,
    };
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    #[derive(Default)]
    struct CountingProcessor {
        calls: AtomicUsize,
        fail: bool,
    }

    impl OrderProcessor for CountingProcessor {
        fn process_order(&self, _cart: &Cart, _shipping: &ShippingDetails) -> CartResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CartError::processing("counting", "declined"));
            }
            Ok(())
        }

        fn processor_name(&self) -> &'static str {
            "counting"
        }
    }

    fn test_state(processor: Arc<CountingProcessor>) -> AppState {
        let catalog = ProductCatalog::new()
            .with_product(Product::new(1, "Kayak", Decimal::from(275)).with_category("Watersports"))
            .with_product(
                Product::new(2, "Soccer Ball", Decimal::new(1950, 2)).with_category("Soccer"),
            );
        let config = AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            environment: "test".into(),
            catalog_path: None,
            cart_idle_timeout: Duration::from_secs(60),
        };
        AppState::with_parts(config, Arc::new(catalog), processor)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn new_cart(app: &Router) -> String {
        let (status, body) = send(app, "POST", "/api/v1/carts", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["cart_id"].as_str().unwrap().to_string()
    }

    fn cart_uri(cart_id: &str, action: &str) -> String {
        if action.is_empty() {
            format!("/api/v1/carts/{}", cart_id)
        } else {
            format!("/api/v1/carts/{}/{}", cart_id, action)
        }
    }

    async fn add_product(app: &Router, cart_id: &str, product_id: u32) -> (StatusCode, Value) {
        let body = json!({ "product_id": product_id });
        send(app, "POST", &cart_uri(cart_id, "add"), Some(body)).await
    }

    fn valid_shipping() -> Value {
        json!({
            "name": "Joe Smith",
            "line1": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "country": "USA"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(test_state(Arc::default()));
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_products_filtered_by_category() {
        let app = create_router(test_state(Arc::default()));

        let (_, body) = send(&app, "GET", "/api/v1/products", None).await;
        assert_eq!(body["count"], 2);

        let (_, body) = send(&app, "GET", "/api/v1/products?category=Soccer", None).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["products"][0]["name"], "Soccer Ball");

        let (_, body) = send(&app, "GET", "/api/v1/categories", None).await;
        assert_eq!(body["categories"], json!(["Soccer", "Watersports"]));
    }

    #[tokio::test]
    async fn test_add_view_and_remove() {
        let app = create_router(test_state(Arc::default()));
        let cart_id = new_cart(&app).await;

        let request = json!({ "product_id": 1, "return_url": "/shop" });
        let (status, body) = send(&app, "POST", &cart_uri(&cart_id, "add"), Some(request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["action"], "Index");
        assert_eq!(body["return_url"], "/shop");

        add_product(&app, &cart_id, 1).await;
        add_product(&app, &cart_id, 2).await;
        // Unknown products are ignored but still redirect
        let (status, _) = add_product(&app, &cart_id, 99).await;
        assert_eq!(status, StatusCode::OK);

        let uri = format!("{}?return_url=/shop", cart_uri(&cart_id, ""));
        let (_, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(body["lines"].as_array().unwrap().len(), 2);
        assert_eq!(body["lines"][0]["quantity"], 2);
        assert_eq!(body["return_url"], "/shop");
        assert_eq!(
            body["total_value"].as_str().unwrap().parse::<Decimal>().unwrap(),
            Decimal::new(56950, 2)
        );

        let (_, body) = send(&app, "GET", &cart_uri(&cart_id, "summary"), None).await;
        assert_eq!(body["item_count"], 3);

        let request = json!({ "product_id": 1 });
        send(&app, "POST", &cart_uri(&cart_id, "remove"), Some(request)).await;
        let (_, body) = send(&app, "GET", &cart_uri(&cart_id, "summary"), None).await;
        assert_eq!(body["line_count"], 1);
    }

    #[tokio::test]
    async fn test_unknown_cart_is_not_found() {
        let app = create_router(test_state(Arc::default()));
        let uri = cart_uri(&uuid::Uuid::new_v4().to_string(), "");

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn test_deleted_cart_is_gone() {
        let app = create_router(test_state(Arc::default()));
        let cart_id = new_cart(&app).await;
        add_product(&app, &cart_id, 1).await;

        let (status, _) = send(&app, "DELETE", &cart_uri(&cart_id, ""), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &cart_uri(&cart_id, ""), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = add_product(&app, &cart_id, 1).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "DELETE", &cart_uri(&cart_id, ""), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_redisplays_form() {
        let processor = Arc::new(CountingProcessor::default());
        let app = create_router(test_state(processor.clone()));
        let cart_id = new_cart(&app).await;

        let uri = cart_uri(&cart_id, "checkout");
        let (status, body) = send(&app, "POST", &uri, Some(valid_shipping())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"], "");
        assert_eq!(body["valid"], false);
        assert_eq!(body["errors"][""][0], "Sorry, your cart is empty!");
        assert_eq!(processor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_checkout_invalid_shipping_redisplays_form() {
        let processor = Arc::new(CountingProcessor::default());
        let app = create_router(test_state(processor.clone()));
        let cart_id = new_cart(&app).await;
        add_product(&app, &cart_id, 1).await;

        let uri = cart_uri(&cart_id, "checkout");
        let (_, body) = send(&app, "POST", &uri, Some(json!({ "name": "Joe" }))).await;

        assert_eq!(body["view"], "");
        assert_eq!(body["valid"], false);
        assert_eq!(body["errors"]["city"][0], "Please enter a city name");
        assert_eq!(body["shipping_details"]["name"], "Joe");
        assert_eq!(processor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_checkout_completes_and_clears_cart() {
        let processor = Arc::new(CountingProcessor::default());
        let app = create_router(test_state(processor.clone()));
        let cart_id = new_cart(&app).await;
        add_product(&app, &cart_id, 1).await;

        let uri = cart_uri(&cart_id, "checkout");
        let (_, body) = send(&app, "POST", &uri, Some(valid_shipping())).await;

        assert_eq!(body["view"], "Completed");
        assert_eq!(body["valid"], true);
        assert_eq!(processor.calls.load(Ordering::SeqCst), 1);

        let (_, body) = send(&app, "GET", &cart_uri(&cart_id, "summary"), None).await;
        assert_eq!(body["line_count"], 0);
    }

    #[tokio::test]
    async fn test_checkout_unknown_cart_is_not_found() {
        let processor = Arc::new(CountingProcessor::default());
        let app = create_router(test_state(processor.clone()));

        let uri = cart_uri(&uuid::Uuid::new_v4().to_string(), "checkout");
        let (status, _) = send(&app, "POST", &uri, Some(valid_shipping())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(processor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_processor_failure_is_bad_gateway() {
        let processor = Arc::new(CountingProcessor {
            fail: true,
            ..Default::default()
        });
        let app = create_router(test_state(processor));
        let cart_id = new_cart(&app).await;
        add_product(&app, &cart_id, 1).await;

        let uri = cart_uri(&cart_id, "checkout");
        let (status, _) = send(&app, "POST", &uri, Some(valid_shipping())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (_, body) = send(&app, "GET", &cart_uri(&cart_id, "summary"), None).await;
        assert_eq!(body["line_count"], 1);
    }
}
