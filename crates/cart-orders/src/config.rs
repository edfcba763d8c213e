//! # Order Processor Configuration
//!
//! Selects and configures the order processor from environment variables.

use crate::processors::{FileOrderProcessor, LoggingOrderProcessor};
use cart_core::{BoxedOrderProcessor, CartError};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

/// Order notification settings
#[derive(Debug, Clone)]
pub struct OrderProcessorConfig {
    /// Recipient of order notifications
    pub mail_to: String,

    /// Sender of order notifications
    pub mail_from: String,

    /// Write notifications into `pickup_dir` instead of only logging them
    pub write_as_file: bool,

    /// Directory receiving one file per order
    pub pickup_dir: PathBuf,
}

impl OrderProcessorConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `ORDER_MAIL_TO` (default `orders@example.com`)
    /// - `ORDER_MAIL_FROM` (default `cart@example.com`)
    /// - `ORDER_WRITE_AS_FILE` (`true`/`false`, default `false`)
    /// - `ORDER_PICKUP_DIR` (default `orders`)
    pub fn from_env() -> Result<Self, CartError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let write_as_file = match env::var("ORDER_WRITE_AS_FILE") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                CartError::Configuration(format!(
                    "ORDER_WRITE_AS_FILE must be true or false, got {:?}",
                    raw
                ))
            })?,
            Err(_) => defaults.write_as_file,
        };

        Ok(Self {
            mail_to: env::var("ORDER_MAIL_TO").unwrap_or(defaults.mail_to),
            mail_from: env::var("ORDER_MAIL_FROM").unwrap_or(defaults.mail_from),
            write_as_file,
            pickup_dir: env::var("ORDER_PICKUP_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.pickup_dir),
        })
    }

    /// Builder: write notifications into `dir`
    pub fn with_pickup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.write_as_file = true;
        self.pickup_dir = dir.into();
        self
    }

    /// Build the configured processor
    pub fn build(&self) -> BoxedOrderProcessor {
        if self.write_as_file {
            Arc::new(FileOrderProcessor::new(self.clone()))
        } else {
            Arc::new(LoggingOrderProcessor::new(self.clone()))
        }
    }
}

impl Default for OrderProcessorConfig {
    fn default() -> Self {
        Self {
            mail_to: "orders@example.com".to_string(),
            mail_from: "cart@example.com".to_string(),
            write_as_file: false,
            pickup_dir: PathBuf::from("orders"),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
