//! Core types for the returns proxy.
//!
//! Customer-supplied lookup fields arrive with arbitrary casing, stray
//! whitespace, and display prefixes. These wrappers normalize at the
//! boundary so everything downstream compares exact values.

pub mod email;
pub mod order_number;

pub use email::{Email, EmailError};
pub use order_number::{OrderNumber, OrderNumberError};
