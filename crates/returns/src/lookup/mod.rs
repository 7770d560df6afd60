//! Order lookup: normalization, query generation, resolution, projection.
//!
//! A customer types an email and an order number into the returns UI; the
//! upstream order search is fuzzy and only supports coarse query strings.
//! This module turns that pair into a single verified order or a typed
//! failure:
//!
//! 1. [`NormalizedLookupKey`] canonicalizes the raw input (or rejects it).
//! 2. [`generate_queries`] produces a widening sequence of search queries.
//! 3. [`resolve`] probes them in order through an [`OrderSearch`]
//!    collaborator, locally re-verifying the email on every candidate.
//! 4. [`project_order`] reshapes the resolved order for the frontend.
//!
//! Everything here is request-scoped; there is no shared mutable state and
//! no caching.

pub mod projection;
pub mod queries;
pub mod resolver;

pub use projection::{LineItemView, LookupResponse, project_order};
pub use queries::{SearchQuery, generate_queries};
pub use resolver::{CANDIDATE_LIMIT, LookupOutcome, OrderSearch, resolve};

use driftwood_core::{Email, EmailError, OrderNumber, OrderNumberError};
use serde::Deserialize;

/// Raw, untrusted lookup request as posted by the returns UI.
///
/// Fields default to empty so a missing field is classified as invalid
/// input rather than rejected at the deserialization layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub order_number: String,
}

/// Why a [`LookupRequest`] could not be normalized.
#[derive(thiserror::Error, Debug)]
pub enum LookupInputError {
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    OrderNumber(#[from] OrderNumberError),
}

/// A normalized (email, order number) pair.
///
/// Construction guarantees both fields are non-empty and canonical:
/// the email trimmed and lowercased, the order number trimmed with its
/// display `#` stripped. No search runs without one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLookupKey {
    email: Email,
    order_number: OrderNumber,
}

impl NormalizedLookupKey {
    /// Normalize a raw request.
    ///
    /// # Errors
    ///
    /// Returns an error when either field is empty after normalization or
    /// the email is structurally unusable (no `@`, empty local part or
    /// domain) - such input can never match an order, so it is rejected
    /// before any upstream call.
    pub fn from_request(request: &LookupRequest) -> Result<Self, LookupInputError> {
        Ok(Self {
            email: Email::parse(&request.email)?,
            order_number: OrderNumber::parse(&request.order_number)?,
        })
    }

    /// The normalized customer email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// The bare order number (no `#`).
    #[must_use]
    pub const fn order_number(&self) -> &OrderNumber {
        &self.order_number
    }
}
