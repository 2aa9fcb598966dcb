//! WhatsApp order handoff.
//!
//! Checkout never settles payment. It formats the order as text and wraps it
//! in a `wa.me` deep link that opens a chat with the shop. The message layout
//! is what the shop's staff read, so it must stay byte-for-byte stable.

use std::fmt::Write as _;

use serde::Serialize;

use crate::cart::{Cart, CartItem};
use crate::types::Price;

/// Default brand name used in greetings.
pub const DEFAULT_BRAND: &str = "ISHA'S FRAGRANCE";

/// Default WhatsApp number orders are sent to.
pub const DEFAULT_RECIPIENT: &str = "+2348082201270";

const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// A formatted message and the link that delivers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLink {
    pub message: String,
    pub url: String,
}

/// Who the order is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    brand: String,
    recipient: String,
}

impl Default for Handoff {
    fn default() -> Self {
        Self::new(DEFAULT_BRAND, DEFAULT_RECIPIENT)
    }
}

impl Handoff {
    #[must_use]
    pub fn new(brand: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            recipient: recipient.into(),
        }
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Multi-line order for a whole cart.
    ///
    /// ```text
    /// Hi ISHA'S FRAGRANCE! I want to order:
    ///
    /// 1. Rose Elegance - 50ml x2 = ₦30,000
    ///
    /// Total: ₦30,000
    ///
    /// Please confirm availability and delivery details.
    /// ```
    ///
    /// An empty `items` slice still produces the greeting, total and closing
    /// line.
    #[must_use]
    pub fn cart_message(&self, items: &[CartItem], total: Price) -> String {
        let mut message = format!("Hi {}! I want to order:\n\n", self.brand);

        for (index, item) in items.iter().enumerate() {
            // Writing to a String cannot fail.
            let _ = writeln!(
                message,
                "{}. {} - {} x{} = {}",
                index + 1,
                item.name,
                item.size,
                item.quantity,
                item.line_total()
            );
        }

        let _ = write!(
            message,
            "\nTotal: {total}\n\nPlease confirm availability and delivery details."
        );
        message
    }

    /// One-line quick order for a single size of a product.
    #[must_use]
    pub fn product_message(&self, name: &str, size: &str, price: Price) -> String {
        format!(
            "Hi {}! I want to order: {name} \u{2013} {size} at {price}.",
            self.brand
        )
    }

    /// Opening line for the floating chat button and contact page.
    #[must_use]
    pub fn general_message(&self) -> String {
        format!("Hi {}! I'd love to order this perfume:", self.brand)
    }

    /// Deep link that opens a chat with `message` prefilled.
    #[must_use]
    pub fn link(&self, message: &str) -> String {
        format!(
            "{WHATSAPP_BASE_URL}/{}?text={}",
            self.recipient,
            urlencoding::encode(message)
        )
    }

    /// Message and link for a cart, using its current items and total.
    #[must_use]
    pub fn cart_order(&self, cart: &Cart) -> OrderLink {
        self.order(self.cart_message(cart.items(), cart.total_price()))
    }

    /// Message and link for a single-product quick order.
    #[must_use]
    pub fn product_order(&self, name: &str, size: &str, price: Price) -> OrderLink {
        self.order(self.product_message(name, size, price))
    }

    /// Message and link for a general enquiry.
    #[must_use]
    pub fn general_order(&self) -> OrderLink {
        self.order(self.general_message())
    }

    fn order(&self, message: String) -> OrderLink {
        let url = self.link(&message);
        OrderLink { message, url }
    }
}
