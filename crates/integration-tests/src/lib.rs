//! Integration tests for the Driftwood returns proxy.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server with test credentials
//! cargo run -p driftwood-returns
//!
//! # Run integration tests
//! cargo test -p driftwood-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `RETURNS_BASE_URL` - server under test (default: http://localhost:3000)
//! - `SHOPIFY_APP_SECRET` - shared secret for signing proxied requests
//!
//! Tests that hit the app-proxy routes sign their own query strings the way
//! Shopify does, so they exercise the signature middleware for real.
