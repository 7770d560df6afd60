//! Search-query generation for order lookup.

use core::fmt;

use super::NormalizedLookupKey;

/// An opaque query string in the upstream order-search syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Returns the query string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Produce the ordered query variants for a lookup key, most specific first.
///
/// The upstream search does not reliably support compound boolean queries
/// across the two email fields, and `#`-prefixed literals can tokenize
/// unpredictably, so the sequence widens:
///
/// 1. number (bare or `#`-prefixed) AND either email field
/// 2. same, with the number literals quoted
/// 3. number only
/// 4. number only, quoted
///
/// Correctness does not depend on which variant matches - the resolver
/// re-verifies the email locally on every candidate. Deterministic, pure,
/// always four entries.
#[must_use]
pub fn generate_queries(key: &NormalizedLookupKey) -> Vec<SearchQuery> {
    let number = key.order_number().as_str();
    let email = key.email().as_str();

    vec![
        SearchQuery(format!(
            "(name:#{number} OR name:{number}) AND (email:{email} OR customer_email:{email})"
        )),
        SearchQuery(format!(
            "(name:\"#{number}\" OR name:\"{number}\") AND (email:{email} OR customer_email:{email})"
        )),
        SearchQuery(format!("(name:#{number} OR name:{number})")),
        SearchQuery(format!("(name:\"#{number}\" OR name:\"{number}\")")),
    ]
}
