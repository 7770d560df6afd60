//! Shopify Admin API GraphQL client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::ShopifyAdminConfig;
use crate::lookup::{OrderSearch, SearchQuery};

use super::queries::{ORDER_SEARCH_QUERY, OrderSearchData, convert_order};
use super::types::OrderCandidate;
use super::{AdminError, GraphQLError};

/// Upstream call timeout. The resolver relies on this client bounding its
/// own calls; nothing above it enforces a deadline.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the Shopify Admin API.
///
/// Holds the endpoint and access token resolved once from configuration at
/// process start; no ambient global state.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: SecretString,
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<WireGraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct WireGraphQLError {
    message: String,
    #[serde(default)]
    path: Option<Vec<serde_json::Value>>,
}

impl AdminClient {
    /// Create a new Admin API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ShopifyAdminConfig) -> Result<Self, AdminError> {
        let client = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;

        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            config.shop, config.api_version
        );

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                endpoint,
                access_token: config.admin_token.clone(),
            }),
        })
    }

    /// Execute a GraphQL document.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, AdminError> {
        let request_body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header(
                "X-Shopify-Access-Token",
                self.inner.access_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(AdminError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify Admin API returned non-success status"
            );
            return Err(AdminError::Status(status.as_u16()));
        }

        let envelope: GraphQLResponse<T> = match serde_json::from_str(&response_text) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(AdminError::Parse(e));
            }
        };

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            tracing::debug!(count = errors.len(), "GraphQL errors in response");

            return Err(AdminError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| GraphQLError {
                        message: e.message,
                        path: e.path.unwrap_or_default(),
                    })
                    .collect(),
            ));
        }

        envelope.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify GraphQL response has no data and no errors"
            );
            AdminError::MissingData
        })
    }

    /// Search orders with one query string.
    ///
    /// Returns the raw candidate list; email verification is the caller's
    /// responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails at the transport level,
    /// returns a non-success status, or carries GraphQL errors.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_orders(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<OrderCandidate>, AdminError> {
        let variables = serde_json::json!({ "q": query.as_str() });

        let data: OrderSearchData = self.execute(ORDER_SEARCH_QUERY, variables).await?;

        let candidates: Vec<OrderCandidate> = data
            .orders
            .edges
            .into_iter()
            .map(|edge| convert_order(edge.node))
            .collect();

        debug!(count = candidates.len(), "order search returned candidates");
        Ok(candidates)
    }
}

impl OrderSearch for AdminClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<OrderCandidate>, AdminError> {
        self.search_orders(query).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decode_with_errors() {
        let envelope: GraphQLResponse<OrderSearchData> = serde_json::from_str(
            r#"{"errors":[{"message":"Field 'orders' doesn't accept argument 'foo'","path":["query OrderSearch"]}]}"#,
        )
        .unwrap();

        assert!(envelope.data.is_none());
        let errors = envelope.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("doesn't accept argument"));
    }

    #[test]
    fn test_envelope_decode_with_data() {
        let envelope: GraphQLResponse<OrderSearchData> =
            serde_json::from_str(r#"{"data":{"orders":{"edges":[]}}}"#).unwrap();

        assert!(envelope.errors.is_none());
        assert!(envelope.data.unwrap().orders.edges.is_empty());
    }

    #[test]
    fn test_endpoint_shape() {
        let config = ShopifyAdminConfig {
            shop: "test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            admin_token: SecretString::from("token"),
            app_secret: SecretString::from("app"),
        };

        let client = AdminClient::new(&config).unwrap();
        assert_eq!(
            client.inner.endpoint,
            "https://test.myshopify.com/admin/api/2026-01/graphql.json"
        );
    }
}
