//! # Order Receipts
//!
//! Plain-text order notification rendered from a cart and its shipping
//! details. The same text is logged or written to the pickup directory.

use crate::config::OrderProcessorConfig;
use cart_core::{format_money, Cart, Decimal, ShippingDetails};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A rendered order notification
#[derive(Debug, Clone)]
pub struct OrderReceipt {
    /// Generated order reference
    pub order_id: Uuid,
    pub mail_to: String,
    pub mail_from: String,
    pub subject: String,
    pub body: String,
    pub total: Decimal,
    pub submitted_at: DateTime<Utc>,
}

impl OrderReceipt {
    /// Render a receipt for `cart` shipped to `shipping`
    pub fn render(cart: &Cart, shipping: &ShippingDetails, config: &OrderProcessorConfig) -> Self {
        let total = cart.compute_total_value();
        let mut lines = vec![
            "A new order has been submitted".to_string(),
            "---".to_string(),
            "Items:".to_string(),
        ];
        lines.extend(cart.lines().iter().map(|line| {
            format!(
                "{} x {} (subtotal: {})",
                line.quantity,
                line.product.name,
                format_money(line.subtotal())
            )
        }));
        lines.push(format!("Total order value: {}", format_money(total)));
        lines.push("---".to_string());
        lines.push("Ship to:".to_string());
        lines.push(shipping.name.clone());
        lines.extend(shipping.address_lines().map(String::from));
        lines.extend(
            [&shipping.city, &shipping.state, &shipping.zip, &shipping.country]
                .into_iter()
                .filter(|part| !part.trim().is_empty())
                .cloned(),
        );
        lines.push("---".to_string());
        lines.push(format!(
            "Gift wrap: {}",
            if shipping.gift_wrap { "Yes" } else { "No" }
        ));

        let mut body = lines.join("\n");
        body.push('\n');

        Self {
            order_id: Uuid::new_v4(),
            mail_to: config.mail_to.clone(),
            mail_from: config.mail_from.clone(),
            subject: "New order submitted!".to_string(),
            body,
            total,
            submitted_at: Utc::now(),
        }
    }

    /// Full message with headers, as written to the pickup directory
    pub fn to_message(&self) -> String {
        format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nDate: {}\r\nX-Order-Id: {}\r\n\r\n{}",
            self.mail_from,
            self.mail_to,
            self.subject,
            self.submitted_at.to_rfc2822(),
            self.order_id,
            self.body
        )
    }

    /// File name for the pickup directory
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}.eml",
            self.submitted_at.format("%Y%m%dT%H%M%S"),
            self.order_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_core::Product;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(&Product::new(1, "Kayak", Decimal::from(275)), 1)
            .unwrap();
        cart.add_item(&Product::new(2, "Lifejacket", Decimal::new(4895, 2)), 2)
            .unwrap();
        cart
    }

    fn sample_shipping() -> ShippingDetails {
        let mut details = ShippingDetails::default()
            .with_name("Joe Smith")
            .with_address("1 Main St", "Springfield", "IL", "USA")
            .with_gift_wrap(true);
        details.line2 = "Apt 4".into();
        details
    }

    #[test]
    fn test_receipt_body() {
        let receipt = OrderReceipt::render(
            &sample_cart(),
            &sample_shipping(),
            &OrderProcessorConfig::default(),
        );

        assert!(receipt.body.contains("1 x Kayak (subtotal: $275.00)"));
        assert!(receipt.body.contains("2 x Lifejacket (subtotal: $97.90)"));
        assert!(receipt.body.contains("Total order value: $372.90"));
        assert!(receipt.body.contains("1 Main St\nApt 4\nSpringfield"));
        assert!(receipt.body.contains("Gift wrap: Yes"));
        assert_eq!(receipt.total, Decimal::new(37290, 2));
    }

    #[test]
    fn test_message_headers() {
        let config = OrderProcessorConfig {
            mail_to: "shop@example.com".into(),
            ..Default::default()
        };
        let receipt = OrderReceipt::render(&sample_cart(), &sample_shipping(), &config);
        let message = receipt.to_message();

        assert!(message.starts_with("From: cart@example.com\r\nTo: shop@example.com\r\n"));
        assert!(message.ends_with(&receipt.body));
        assert!(receipt.file_name().ends_with(&format!("{}.eml", receipt.order_id)));
    }
}
