//! HTTP route handlers for the returns proxy.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check
//! GET  /debug/config                  - Redacted configuration snapshot
//!
//! # App proxy (signature-gated, subpath configurable)
//! POST <subpath>/lookup               - Order lookup by email + number
//! GET  <subpath>/exchange-options     - Exchange variants for a product
//! POST <subpath>/returns              - Create a return/exchange request
//! ```

pub mod debug;
pub mod exchange_options;
pub mod lookup;
pub mod returns;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::middleware::verify_proxy_signature;
use crate::state::AppState;

/// Create the signature-gated app-proxy routes router.
pub fn proxy_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/lookup", post(lookup::lookup))
        .route("/exchange-options", get(exchange_options::list))
        .route("/returns", post(returns::create))
        .layer(from_fn_with_state(state, verify_proxy_signature))
}

/// Create all routes for the returns proxy.
///
/// Health endpoints live outside the gated subtree; Shopify never proxies
/// them and they must stay reachable for the platform's probes.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/debug/config", get(debug::config_snapshot))
        .nest(
            state.config().proxy_subpath.as_str(),
            proxy_routes(state.clone()),
        )
}
