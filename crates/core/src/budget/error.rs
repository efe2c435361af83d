//! Budget validation error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Balance check failures for a proposed expenditure.
///
/// All variants map to the `BusinessRuleViolation` error kind at the
/// application boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// No allotment issued: releases are capped by the appropriation.
    #[error("releases exceed appropriation: {releases} > {appropriation}")]
    ReleasesExceedAppropriation {
        /// Proposed release amount.
        releases: Decimal,
        /// Appropriation ceiling.
        appropriation: Decimal,
    },

    /// Cumulative actual expenditure would exceed the allotment.
    #[error("actual expenditure exceeds allotment: {cumulative} > {allotment}")]
    ActualExceedsAllotment {
        /// Cumulative actual expenditure including the proposed entry.
        cumulative: Decimal,
        /// Allotment ceiling.
        allotment: Decimal,
    },

    /// Cumulative releases would exceed the allotment balance.
    #[error("releases exceed allotment balance: {cumulative} > {allotment}")]
    ReleasesExceedAllotmentBalance {
        /// Cumulative releases including the proposed entry.
        cumulative: Decimal,
        /// Allotment ceiling.
        allotment: Decimal,
    },
}
