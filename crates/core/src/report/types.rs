//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel funding-source value meaning "all sources".
const ALL_SOURCES: &str = "ALL";

/// One appropriation aggregate: summed budget allocation for a
/// (classification, funding source) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppropriationAggregate {
    /// Economic classification.
    pub economic_classification: String,
    /// Funding source code.
    pub funding_source: String,
    /// Summed appropriation.
    pub total_appropriation: Decimal,
}

/// One execution aggregate: summed expenditure activity for a
/// (classification, funding source) pair within a quarter window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionAggregate {
    /// Economic classification.
    pub economic_classification: String,
    /// Funding source code.
    pub funding_source: String,
    /// Summed releases.
    pub total_releases: Decimal,
    /// Summed actual expenditure.
    pub total_expenditure: Decimal,
    /// Summed actual payments.
    pub total_payment: Decimal,
}

/// Funding source filter for report requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundingFilter {
    /// No filtering; every funding source is included.
    All,
    /// Restrict breakdown rows to a single funding source.
    Source(String),
}

impl FundingFilter {
    /// Parses the caller-supplied filter; absent or the `"ALL"` sentinel
    /// means no filtering.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some(ALL_SOURCES) => Self::All,
            Some(source) => Self::Source(source.to_string()),
        }
    }

    /// Returns true when the given funding source passes the filter.
    #[must_use]
    pub fn matches(&self, funding_source: &str) -> bool {
        match self {
            Self::All => true,
            Self::Source(source) => source == funding_source,
        }
    }
}

/// Per-funding-source breakdown row nested under a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingBreakdown {
    /// Funding source code.
    pub source: String,
    /// Summed appropriation for this source.
    pub total_budget: Decimal,
    /// Summed releases.
    pub amount_released: Decimal,
    /// Summed actual expenditure.
    pub actual_expenditure: Decimal,
    /// Summed actual payments.
    pub actual_payments: Decimal,
    /// Always zero; no forecasting logic is in scope.
    pub projection: Decimal,
}

impl FundingBreakdown {
    /// A zeroed breakdown row for the given funding source.
    #[must_use]
    pub fn zeroed(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            total_budget: Decimal::ZERO,
            amount_released: Decimal::ZERO,
            actual_expenditure: Decimal::ZERO,
            actual_payments: Decimal::ZERO,
            projection: Decimal::ZERO,
        }
    }
}

/// One classification-level report row with its funding breakdown.
///
/// This shape is serializer-agnostic: the JSON endpoint, the spreadsheet
/// writer, and the PDF writer all consume it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicReportRow {
    /// Economic classification title.
    pub title: String,
    /// Summed appropriation across the visible breakdown.
    pub total_budget: Decimal,
    /// Summed releases across the visible breakdown.
    pub amount_released: Decimal,
    /// Summed actual expenditure across the visible breakdown.
    pub actual_expenditure: Decimal,
    /// Summed actual payments across the visible breakdown.
    pub actual_payments: Decimal,
    /// Always zero; no forecasting logic is in scope.
    pub projection: Decimal,
    /// Per-funding-source breakdown rows.
    pub breakdown: Vec<FundingBreakdown>,
}

impl EconomicReportRow {
    /// An empty parent row for the given classification.
    #[must_use]
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            total_budget: Decimal::ZERO,
            amount_released: Decimal::ZERO,
            actual_expenditure: Decimal::ZERO,
            actual_payments: Decimal::ZERO,
            projection: Decimal::ZERO,
            breakdown: Vec::new(),
        }
    }
}

/// Flat grand-total record over a whole report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    /// Total appropriation.
    pub total_budget: Decimal,
    /// Total releases.
    pub amount_released: Decimal,
    /// Total actual expenditure.
    pub actual_expenditure: Decimal,
    /// Total actual payments.
    pub actual_payments: Decimal,
    /// Always zero.
    pub projection: Decimal,
}
