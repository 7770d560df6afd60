//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding. All route handlers return `Result<T, AppError>`.
//!
//! The frontend contract keys on the machine-readable `error` code in the
//! JSON body; internal failure detail (upstream status codes, parse errors)
//! stays in logs and Sentry, never in responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::shopify::AdminError;

/// Application-level error type for the returns proxy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Proxy signature missing or wrong.
    #[error("Bad proxy signature")]
    BadSignature,

    /// Lookup fields missing or empty after normalization.
    #[error("Missing or unusable lookup fields")]
    MissingFields,

    /// No order satisfied the number + email combination.
    #[error("Order not found or email mismatch")]
    OrderNotFound,

    /// Exchange options requested for a product not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Every attempted upstream call failed.
    #[error("Upstream error: {0}")]
    Upstream(#[from] AdminError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable code returned to the frontend.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadSignature => "BAD_SIGNATURE",
            Self::MissingFields => "MISSING_FIELDS",
            Self::OrderNotFound => "ORDER_NOT_FOUND_OR_EMAIL_MISMATCH",
            Self::UnknownProduct(_) => "PRODUCT_NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::BadSignature => StatusCode::UNAUTHORIZED,
            Self::MissingFields | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::OrderNotFound | Self::UnknownProduct(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side errors to Sentry; client errors are expected
        // traffic
        if matches!(self, Self::Upstream(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = Json(serde_json::json!({ "error": self.code() }));
        (self.status(), body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::UnknownProduct("gid://shopify/Product/99".to_string());
        assert_eq!(err.to_string(), "Unknown product: gid://shopify/Product/99");

        let err = AppError::BadRequest("invalid quantity".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid quantity");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(get_status(AppError::BadSignature), StatusCode::UNAUTHORIZED);
        assert_eq!(get_status(AppError::MissingFields), StatusCode::BAD_REQUEST);
        assert_eq!(get_status(AppError::OrderNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            get_status(AppError::UnknownProduct("p".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Upstream(AdminError::Status(503))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_and_upstream_are_distinct() {
        // The frontend needs to tell "no such order" apart from "Shopify is
        // down"
        let not_found = AppError::OrderNotFound;
        let upstream = AppError::Upstream(AdminError::Status(500));

        assert_ne!(not_found.code(), upstream.code());
        assert_ne!(
            not_found.into_response().status(),
            upstream.into_response().status()
        );
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(AppError::MissingFields.code(), "MISSING_FIELDS");
        assert_eq!(
            AppError::OrderNotFound.code(),
            "ORDER_NOT_FOUND_OR_EMAIL_MISMATCH"
        );
        assert_eq!(AppError::BadSignature.code(), "BAD_SIGNATURE");
        assert_eq!(
            AppError::Upstream(AdminError::MissingData).code(),
            "UPSTREAM_ERROR"
        );
    }
}
