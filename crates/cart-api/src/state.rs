//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the cart controller, product catalog, session carts and configuration.

use crate::session::CartStore;
use cart_core::{BoxedOrderProcessor, BoxedProductRepository, CartController, ProductCatalog};
use cart_orders::OrderProcessorConfig;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default idle time before a session cart is dropped
const DEFAULT_CART_IDLE_SECS: u64 = 3600;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit catalog file, overrides the default search paths
    pub catalog_path: Option<PathBuf>,
    /// Session carts unused this long are dropped
    pub cart_idle_timeout: Duration,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            catalog_path: std::env::var("CATALOG_PATH").ok().map(PathBuf::from),
            cart_idle_timeout: Duration::from_secs(
                std::env::var("CART_IDLE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_CART_IDLE_SECS),
            ),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e)
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Cart actions
    pub controller: CartController,
    /// Product lookup
    pub catalog: BoxedProductRepository,
    /// Session carts
    pub carts: CartStore,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState from the environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        // Load product catalog
        let catalog = load_product_catalog(config.catalog_path.as_deref())?;

        // Initialize order processor
        let processor = OrderProcessorConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to configure order processor: {}", e))?
            .build();

        Ok(Self::with_parts(config, Arc::new(catalog), processor))
    }

    /// Assemble state from explicit parts
    pub fn with_parts(
        config: AppConfig,
        catalog: BoxedProductRepository,
        processor: BoxedOrderProcessor,
    ) -> Self {
        Self {
            controller: CartController::new(catalog.clone(), processor),
            catalog,
            carts: CartStore::new(),
            config,
        }
    }
}

/// Load product catalog from config file
fn load_product_catalog(explicit: Option<&std::path::Path>) -> anyhow::Result<ProductCatalog> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let catalog = ProductCatalog::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded {} products from {}", catalog.len(), path.display());
        return Ok(catalog);
    }

    // Try to load from config/products.toml
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = ProductCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded {} products from {}", catalog.len(), path);
            return Ok(catalog);
        }
    }

    // Return empty catalog if no config found
    tracing::warn!("No product catalog found, using empty catalog");
    Ok(ProductCatalog::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        // Clear env vars for test
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("CATALOG_PATH");
        std::env::remove_var("CART_IDLE_TIMEOUT_SECS");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.catalog_path.is_none());
        assert_eq!(config.cart_idle_timeout, Duration::from_secs(3600));
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
            catalog_path: None,
            cart_idle_timeout: Duration::from_secs(60),
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
        assert!(!config.is_production());
    }

    #[test]
    fn test_invalid_socket_addr() {
        let config = AppConfig {
            host: "not a host".to_string(),
            port: 3000,
            environment: "test".to_string(),
            catalog_path: None,
            cart_idle_timeout: Duration::from_secs(60),
        };

        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_missing_explicit_catalog_is_an_error() {
        let path = std::env::temp_dir().join(format!("missing-{}.toml", uuid::Uuid::new_v4()));
        assert!(load_product_catalog(Some(path.as_path())).is_err());
    }
}
