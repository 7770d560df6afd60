//! Exchange-options route handler.
//!
//! Serves the variant options a customer can exchange into. This iteration
//! ships a static in-process catalog; the response shape is the contract a
//! live catalog lookup will slot into later.

use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};

/// Query parameters for the exchange-options listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeOptionsParams {
    #[serde(default)]
    pub product_id: String,
}

/// Exchange options for one product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeOptionsResponse {
    pub product_id: String,
    pub options: Vec<VariantOption>,
}

/// One variant a line item can be exchanged into.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOption {
    pub variant_id: String,
    pub title: String,
    pub available: bool,
}

/// Static exchange catalog: (product GID, variants).
const EXCHANGE_CATALOG: &[(&str, &[(&str, &str, bool)])] = &[
    (
        "gid://shopify/Product/31",
        &[
            ("gid://shopify/ProductVariant/211", "S / White", true),
            ("gid://shopify/ProductVariant/212", "M / White", true),
            ("gid://shopify/ProductVariant/213", "L / White", false),
        ],
    ),
    (
        "gid://shopify/Product/32",
        &[
            ("gid://shopify/ProductVariant/221", "One Size / Natural", true),
            ("gid://shopify/ProductVariant/222", "One Size / Charcoal", true),
        ],
    ),
];

/// List exchange variants for a product.
#[instrument(fields(product_id = %params.product_id))]
pub async fn list(
    Query(params): Query<ExchangeOptionsParams>,
) -> Result<Json<ExchangeOptionsResponse>> {
    let product_id = params.product_id.trim();

    if product_id.is_empty() {
        return Err(AppError::BadRequest("productId is required".to_string()));
    }

    let options = options_for(product_id)
        .ok_or_else(|| AppError::UnknownProduct(product_id.to_string()))?;

    Ok(Json(ExchangeOptionsResponse {
        product_id: product_id.to_string(),
        options,
    }))
}

fn options_for(product_id: &str) -> Option<Vec<VariantOption>> {
    EXCHANGE_CATALOG
        .iter()
        .find(|(id, _)| *id == product_id)
        .map(|(_, variants)| {
            variants
                .iter()
                .map(|(variant_id, title, available)| VariantOption {
                    variant_id: (*variant_id).to_string(),
                    title: (*title).to_string(),
                    available: *available,
                })
                .collect()
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_options_for_known_product() {
        let options = options_for("gid://shopify/Product/31").unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].variant_id, "gid://shopify/ProductVariant/211");
        assert!(options[0].available);
        assert!(!options[2].available);
    }

    #[test]
    fn test_options_for_unknown_product() {
        assert!(options_for("gid://shopify/Product/99").is_none());
    }

    #[tokio::test]
    async fn test_list_rejects_missing_product_id() {
        let result = list(Query(ExchangeOptionsParams {
            product_id: String::new(),
        }))
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_list_unknown_product_is_not_found() {
        let result = list(Query(ExchangeOptionsParams {
            product_id: "gid://shopify/Product/99".to_string(),
        }))
        .await;

        assert!(matches!(result, Err(AppError::UnknownProduct(_))));
    }
}
