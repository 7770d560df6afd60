//! App-proxy signature verification.
//!
//! Shopify signs every proxied request by HMAC-SHA256 over the query
//! parameters: the `signature` parameter is removed, the remaining
//! parameters are sorted by key, repeated values are joined with commas,
//! and the `key=value` pairs are concatenated WITHOUT a separator. The
//! digest is hex encoded and keyed by the app's shared secret.
//!
//! All handlers under the proxy subpath run behind this check; the core
//! assumes it is only invoked on already-authenticated calls.

use std::collections::BTreeMap;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use sha2::Sha256;
use url::form_urlencoded;

use crate::error::AppError;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Reject requests whose query string is not correctly signed.
pub async fn verify_proxy_signature(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let query = request.uri().query().unwrap_or("");

    if !signature_is_valid(query, state.config().shopify.app_secret.expose_secret()) {
        tracing::warn!(path = %request.uri().path(), "rejected request with bad proxy signature");
        return AppError::BadSignature.into_response();
    }

    next.run(request).await
}

/// Verify the proxy signature over a raw query string.
fn signature_is_valid(query: &str, app_secret: &str) -> bool {
    let mut provided = None;
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key == "signature" {
            provided = Some(value.into_owned());
        } else {
            params.entry(key.into_owned()).or_default().push(value.into_owned());
        }
    }

    let Some(provided) = provided else {
        return false;
    };
    let Ok(signature) = hex::decode(provided) else {
        return false;
    };

    // Sorted by key via the BTreeMap; pairs concatenated without separators
    let message: String = params
        .iter()
        .map(|(key, values)| format!("{key}={}", values.join(",")))
        .collect();

    let Ok(mut mac) = HmacSha256::new_from_slice(app_secret.as_bytes()) else {
        return false;
    };
    mac.update(message.as_bytes());

    // Constant-time comparison
    mac.verify_slice(&signature).is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SECRET: &str = "hush";

    /// Compute a valid signature the way Shopify does.
    fn sign(message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_accepts_valid_signature() {
        let signature = sign("path_prefix=/apps/returnsshop=test.myshopify.comtimestamp=1700000000");
        let query = format!(
            "shop=test.myshopify.com&path_prefix=%2Fapps%2Freturns&timestamp=1700000000&signature={signature}"
        );

        assert!(signature_is_valid(&query, SECRET));
    }

    #[test]
    fn test_rejects_tampered_parameter() {
        let signature = sign("path_prefix=/apps/returnsshop=test.myshopify.comtimestamp=1700000000");
        let query = format!(
            "shop=evil.myshopify.com&path_prefix=%2Fapps%2Freturns&timestamp=1700000000&signature={signature}"
        );

        assert!(!signature_is_valid(&query, SECRET));
    }

    #[test]
    fn test_rejects_missing_signature() {
        assert!(!signature_is_valid("shop=test.myshopify.com", SECRET));
        assert!(!signature_is_valid("", SECRET));
    }

    #[test]
    fn test_rejects_non_hex_signature() {
        assert!(!signature_is_valid(
            "shop=test.myshopify.com&signature=not-hex!",
            SECRET
        ));
    }

    #[test]
    fn test_repeated_values_joined_with_comma() {
        let signature = sign("ids=1,2shop=test.myshopify.com");
        let query = format!("ids=1&ids=2&shop=test.myshopify.com&signature={signature}");

        assert!(signature_is_valid(&query, SECRET));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signature = sign("shop=test.myshopify.com");
        let query = format!("shop=test.myshopify.com&signature={signature}");

        assert!(!signature_is_valid(&query, "different-secret"));
    }
}
