//! Domain error types.

use thiserror::Error;

/// Errors raised by domain values and calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Price is negative, not a number, or not representable in cents.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Cart quantity must be a positive integer.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds the per-entry maximum.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, u32),

    /// Identifier could not be parsed.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
