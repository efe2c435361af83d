//! Economic report merge, grouping, and canonical ordering.
//!
//! The report builder reconciles two independently-keyed aggregate sets
//! (appropriations and execution) into one nested structure that is the
//! single source of truth for the JSON, spreadsheet, and PDF outputs.

pub mod service;
pub mod sort;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::ReportService;
pub use sort::{sort_report, CLASSIFICATION_ORDER, FUNDING_SOURCE_ORDER};
pub use types::{
    AppropriationAggregate, EconomicReportRow, ExecutionAggregate, FundingBreakdown,
    FundingFilter, ReportTotals,
};
