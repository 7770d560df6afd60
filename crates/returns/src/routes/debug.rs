//! Operator debug endpoint.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Redacted configuration snapshot. Secrets never appear here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub shop: String,
    pub api_version: String,
    pub proxy_subpath: String,
    pub sentry_environment: Option<String>,
}

/// Show the non-secret configuration the process is running with.
pub async fn config_snapshot(State(state): State<AppState>) -> Json<ConfigSnapshot> {
    let config = state.config();

    Json(ConfigSnapshot {
        shop: config.shopify.shop.clone(),
        api_version: config.shopify.api_version.clone(),
        proxy_subpath: config.proxy_subpath.clone(),
        sentry_environment: config.sentry_environment.clone(),
    })
}
