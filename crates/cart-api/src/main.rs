//! # Cart Server
//!
//! Session shopping cart over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! # Optional environment variables
//! export CATALOG_PATH=config/products.toml
//! export ORDER_WRITE_AS_FILE=true
//! export ORDER_PICKUP_DIR=/var/spool/orders
//! export CART_IDLE_TIMEOUT_SECS=1800
//!
//! # Run the server
//! cart-server
//! ```

use cart_api::{routes, state::AppState};
use cart_core::ProductRepository;
use std::time::Duration;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Products loaded: {}", state.catalog.products().len());
    info!("Categories: {:?}", state.catalog.categories());

    // Drop abandoned session carts
    let carts = state.carts.clone();
    let idle = state.config.cart_idle_timeout;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(idle.max(Duration::from_secs(1)) / 2);
        loop {
            ticker.tick().await;
            match carts.sweep_idle(idle) {
                Ok(0) => {}
                Ok(removed) => debug!(removed, "Swept idle carts"),
                Err(e) => warn!("Cart sweep failed: {}", e),
            }
        }
    });

    // Create router
    let app = routes::create_router(state);

    info!("Cart server starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("New cart: POST http://{}/api/v1/carts", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
