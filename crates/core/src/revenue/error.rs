//! Revenue error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Revenue computation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevenueError {
    /// Actual collection is negative.
    #[error("Actual collection must be a valid non-negative number")]
    NegativeCollection(Decimal),

    /// Retention rate is negative or missing for the organization.
    #[error("Invalid retention rate for this organization")]
    InvalidRetentionRate(Decimal),
}
