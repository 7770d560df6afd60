//! Merchant-facing order number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OrderNumber`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum OrderNumberError {
    /// The input is empty after stripping the display prefix.
    #[error("order number cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("order number must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A merchant-facing order number.
///
/// Shopify displays order names with a leading `#` (`#7518`), and customers
/// copy them in either form. `parse` stores the bare number so search queries
/// can re-add the prefix deliberately where a variant calls for it.
///
/// ## Examples
///
/// ```
/// use driftwood_core::OrderNumber;
///
/// assert_eq!(OrderNumber::parse("#7518").unwrap().as_str(), "7518");
/// assert_eq!(OrderNumber::parse(" 7518 ").unwrap().as_str(), "7518");
/// assert!(OrderNumber::parse("#").is_err());
/// assert!(OrderNumber::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Maximum length of an order number.
    pub const MAX_LENGTH: usize = 64;

    /// Parse an `OrderNumber`, trimming whitespace and stripping one
    /// leading `#`.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing remains after normalization or the
    /// input exceeds [`Self::MAX_LENGTH`].
    pub fn parse(s: &str) -> Result<Self, OrderNumberError> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();

        if bare.is_empty() {
            return Err(OrderNumberError::Empty);
        }

        if bare.len() > Self::MAX_LENGTH {
            return Err(OrderNumberError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(bare.to_owned()))
    }

    /// Returns the bare order number (no `#` prefix).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `OrderNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderNumber {
    type Err = OrderNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(OrderNumber::parse("7518").unwrap().as_str(), "7518");
    }

    #[test]
    fn test_parse_strips_hash_prefix() {
        assert_eq!(OrderNumber::parse("#7518").unwrap().as_str(), "7518");
        assert_eq!(OrderNumber::parse("  #7518  ").unwrap().as_str(), "7518");
        assert_eq!(OrderNumber::parse("# 7518").unwrap().as_str(), "7518");
    }

    #[test]
    fn test_parse_keeps_interior_hash() {
        // Only the display prefix is stripped
        assert_eq!(OrderNumber::parse("AB#12").unwrap().as_str(), "AB#12");
    }

    #[test]
    fn test_parse_strips_single_prefix_only() {
        assert_eq!(OrderNumber::parse("##7518").unwrap().as_str(), "#7518");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(OrderNumber::parse(""), Err(OrderNumberError::Empty)));
        assert!(matches!(
            OrderNumber::parse("   "),
            Err(OrderNumberError::Empty)
        ));
        assert!(matches!(
            OrderNumber::parse("#"),
            Err(OrderNumberError::Empty)
        ));
        assert!(matches!(
            OrderNumber::parse(" # "),
            Err(OrderNumberError::Empty)
        ));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "9".repeat(65);
        assert!(matches!(
            OrderNumber::parse(&long),
            Err(OrderNumberError::TooLong { .. })
        ));
    }

    #[test]
    fn test_display() {
        let number = OrderNumber::parse("#7518").unwrap();
        assert_eq!(format!("{number}"), "7518");
    }

    #[test]
    fn test_serde_roundtrip() {
        let number = OrderNumber::parse("#7518").unwrap();
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"7518\"");

        let parsed: OrderNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, number);
    }

    #[test]
    fn test_from_str() {
        let number: OrderNumber = "#7518".parse().unwrap();
        assert_eq!(number.as_str(), "7518");
    }
}
