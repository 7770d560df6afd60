//! Candidate types returned by the order search.
//!
//! Decoded once from the GraphQL response at the client boundary. The
//! resolver only filters and selects; it never mutates a candidate.

use driftwood_core::Email;
use serde::{Deserialize, Serialize};

/// An order returned by the upstream search, before local email verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderCandidate {
    /// Shopify order GID (e.g., `gid://shopify/Order/123`).
    pub id: String,
    /// Merchant-facing display name (e.g., `#7518`).
    pub name: String,
    /// Order-level contact email (absent for some POS/guest orders).
    pub email: Option<String>,
    /// Email of the associated customer record, when one exists.
    pub customer_email: Option<String>,
    /// ISO 4217 currency code for the order.
    pub currency_code: String,
    /// Line items in upstream order.
    pub line_items: Vec<LineItemCandidate>,
}

impl OrderCandidate {
    /// Whether the order belongs to `email`.
    ///
    /// True when either the order-level email or the customer email equals
    /// the normalized address. This check is the authorization boundary for
    /// lookups; upstream query matching is never trusted for it.
    #[must_use]
    pub fn belongs_to(&self, email: &Email) -> bool {
        self.email.as_deref().is_some_and(|e| email.matches(e))
            || self.customer_email.as_deref().is_some_and(|e| email.matches(e))
    }
}

/// A line item on an [`OrderCandidate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItemCandidate {
    /// Shopify line-item GID.
    pub id: String,
    /// Product title at time of purchase.
    pub title: String,
    /// Variant title (absent for single-variant products).
    pub variant_title: Option<String>,
    /// Stock keeping unit, when the merchant assigns one.
    pub sku: Option<String>,
    /// Quantity ordered.
    pub quantity: i64,
    /// Quantity still refundable; absent when the platform does not track
    /// refundable state for the order.
    pub refundable_quantity: Option<i64>,
    /// Unit price as a decimal string in presentment currency.
    pub unit_price_amount: Option<String>,
    /// Variant GID, when the variant still exists.
    pub variant_id: Option<String>,
    /// Product GID, when the product still exists.
    pub product_id: Option<String>,
    /// Variant image URL.
    pub image_url: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn candidate(email: Option<&str>, customer_email: Option<&str>) -> OrderCandidate {
        OrderCandidate {
            id: "gid://shopify/Order/1".to_string(),
            name: "#7518".to_string(),
            email: email.map(String::from),
            customer_email: customer_email.map(String::from),
            currency_code: "EUR".to_string(),
            line_items: vec![],
        }
    }

    #[test]
    fn test_belongs_to_order_email() {
        let email = Email::parse("jane@example.com").unwrap();
        assert!(candidate(Some("jane@example.com"), None).belongs_to(&email));
        assert!(candidate(Some("Jane@Example.com "), None).belongs_to(&email));
    }

    #[test]
    fn test_belongs_to_customer_email() {
        let email = Email::parse("jane@example.com").unwrap();
        assert!(candidate(None, Some("JANE@EXAMPLE.COM")).belongs_to(&email));
        assert!(candidate(Some("other@example.com"), Some("jane@example.com")).belongs_to(&email));
    }

    #[test]
    fn test_belongs_to_rejects_mismatch() {
        let email = Email::parse("jane@example.com").unwrap();
        assert!(!candidate(Some("john@example.com"), None).belongs_to(&email));
        assert!(!candidate(None, None).belongs_to(&email));
    }
}
