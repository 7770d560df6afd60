//! Shopify Admin API client.
//!
//! # Architecture
//!
//! - One fixed GraphQL document (order search), posted with `reqwest`
//! - Responses decoded once at this boundary into explicit candidate types
//!   with nullable fields declared up front; core logic never digs through
//!   raw JSON
//! - No caching: every lookup is a fresh upstream call
//!
//! # Example
//!
//! ```rust,ignore
//! use driftwood_returns::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify)?;
//! let candidates = client.search_orders(&query).await?;
//! ```

mod admin;
pub mod queries;
pub mod types;

pub use admin::AdminClient;

use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
///
/// The resolver treats each variant as a failure *kind*: a failed search
/// query moves resolution on to the next query variant, and only the kind of
/// the last failure surfaces when every variant has failed.
#[derive(Debug, Error)]
pub enum AdminError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the API.
    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// Response contained neither data nor errors.
    #[error("GraphQL response has no data")]
    MissingData,
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
