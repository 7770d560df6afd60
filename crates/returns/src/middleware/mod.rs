//! HTTP middleware stack for the returns proxy.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Proxy signature (reject unsigned calls under the proxy subpath)

pub mod proxy_signature;
pub mod request_id;

pub use proxy_signature::verify_proxy_signature;
pub use request_id::request_id_middleware;
