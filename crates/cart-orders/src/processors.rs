//! # Order Processors
//!
//! `OrderProcessor` implementations that turn a checked-out cart into an
//! order notification.

use crate::config::OrderProcessorConfig;
use crate::receipt::OrderReceipt;
use cart_core::{format_money, Cart, CartError, CartResult, OrderProcessor, ShippingDetails};
use std::fs;
use tracing::{debug, info};

/// Logs each order notification
#[derive(Debug, Clone, Default)]
pub struct LoggingOrderProcessor {
    config: OrderProcessorConfig,
}

impl LoggingOrderProcessor {
    pub fn new(config: OrderProcessorConfig) -> Self {
        Self { config }
    }
}

impl OrderProcessor for LoggingOrderProcessor {
    fn process_order(&self, cart: &Cart, shipping_details: &ShippingDetails) -> CartResult<()> {
        let receipt = OrderReceipt::render(cart, shipping_details, &self.config);

        info!(
            order_id = %receipt.order_id,
            to = %receipt.mail_to,
            total = %format_money(receipt.total),
            "Order submitted"
        );
        debug!("{}", receipt.body);

        Ok(())
    }

    fn processor_name(&self) -> &'static str {
        "logging"
    }
}

/// Writes each order notification to a pickup directory
#[derive(Debug, Clone)]
pub struct FileOrderProcessor {
    config: OrderProcessorConfig,
}

impl FileOrderProcessor {
    pub fn new(config: OrderProcessorConfig) -> Self {
        Self { config }
    }
}

impl OrderProcessor for FileOrderProcessor {
    fn process_order(&self, cart: &Cart, shipping_details: &ShippingDetails) -> CartResult<()> {
        let receipt = OrderReceipt::render(cart, shipping_details, &self.config);
        let dir = &self.config.pickup_dir;

        fs::create_dir_all(dir).map_err(|e| {
            CartError::processing(
                self.processor_name(),
                format!("cannot create {}: {}", dir.display(), e),
            )
        })?;

        let path = dir.join(receipt.file_name());
        fs::write(&path, receipt.to_message()).map_err(|e| {
            CartError::processing(
                self.processor_name(),
                format!("cannot write {}: {}", path.display(), e),
            )
        })?;

        info!(
            order_id = %receipt.order_id,
            path = %path.display(),
            total = %format_money(receipt.total),
            "Order written to pickup directory"
        );

        Ok(())
    }

    fn processor_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_core::{Decimal, Product};
    use std::path::PathBuf;

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(&Product::new(1, "Kayak", Decimal::from(275)), 1)
            .unwrap();
        cart
    }

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("cart-orders-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_logging_processor_accepts_order() {
        let processor = LoggingOrderProcessor::default();
        assert!(processor
            .process_order(&cart(), &ShippingDetails::default())
            .is_ok());
    }

    #[test]
    fn test_file_processor_writes_one_file_per_order() {
        let dir = scratch_dir();
        let processor =
            FileOrderProcessor::new(OrderProcessorConfig::default().with_pickup_dir(&dir));

        processor
            .process_order(&cart(), &ShippingDetails::default().with_name("Joe"))
            .unwrap();
        processor
            .process_order(&cart(), &ShippingDetails::default().with_name("Ann"))
            .unwrap();

        let files: Vec<_> = fs::read_dir(&dir).unwrap().collect();
        assert_eq!(files.len(), 2);

        let content = fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
        assert!(content.contains("1 x Kayak (subtotal: $275.00)"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_processor_reports_io_failure() {
        let blocker = scratch_dir();
        fs::write(&blocker, "not a directory").unwrap();
        let processor = FileOrderProcessor::new(
            OrderProcessorConfig::default().with_pickup_dir(blocker.join("orders")),
        );

        let err = processor
            .process_order(&cart(), &ShippingDetails::default())
            .unwrap_err();

        assert!(matches!(
            err,
            CartError::OrderProcessing { ref processor, .. } if processor == "file"
        ));
        fs::remove_file(&blocker).unwrap();
    }
}
