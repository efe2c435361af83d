//! Canonical report ordering.
//!
//! Classifications and funding sources render in a fixed priority
//! order. Values absent from a priority list sort after all known
//! values and keep their relative order among themselves.

use super::types::EconomicReportRow;

/// Fixed presentation order for economic classifications.
pub const CLASSIFICATION_ORDER: [&str; 3] = [
    "Compensation of Employees",
    "Use of Goods and Services",
    "Capital Expenditure",
];

/// Fixed presentation order for funding sources.
pub const FUNDING_SOURCE_ORDER: [&str; 3] = ["GoG", "IGF", "DPF"];

fn priority(order: &[&str], value: &str) -> usize {
    order
        .iter()
        .position(|candidate| *candidate == value)
        .unwrap_or(order.len())
}

/// Sorts classification rows and each row's funding breakdown into the
/// canonical presentation order.
pub fn sort_report(rows: &mut [EconomicReportRow]) {
    rows.sort_by_key(|row| priority(&CLASSIFICATION_ORDER, &row.title));

    for row in rows {
        row.breakdown
            .sort_by_key(|child| priority(&FUNDING_SOURCE_ORDER, &child.source));
    }
}
