//! Driftwood Core - Shared domain types for the returns proxy.
//!
//! This crate contains only types - no I/O, no HTTP clients. The server
//! crate builds its lookup and projection logic on top of these.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for normalized customer emails and
//!   merchant-facing order numbers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
