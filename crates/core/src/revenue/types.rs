//! Revenue domain types.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-organization retention-rate lookup table.
///
/// The rate is a percentage of collected revenue the organization
/// retains; the remainder is paid into the consolidated fund. Each
/// revenue record copies the rate in force at creation time.
#[derive(Debug, Clone, Default)]
pub struct RetentionTable {
    rates: HashMap<String, Decimal>,
}

impl RetentionTable {
    /// Builds a table from (organization, rate-percentage) pairs.
    #[must_use]
    pub fn new(rates: HashMap<String, Decimal>) -> Self {
        Self { rates }
    }

    /// Retention percentage configured for an organization, if any.
    #[must_use]
    pub fn rate_for(&self, organization: &str) -> Option<Decimal> {
        self.rates.get(organization).copied()
    }
}

/// Derived amounts for one revenue collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionSplit {
    /// Amount retained by the organization.
    pub retention_amount: Decimal,
    /// Amount paid into the consolidated fund.
    pub payment_amount: Decimal,
}

/// Aggregated revenue activity for one category within a quarter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueAggregate {
    /// Revenue category (stored form, any case).
    pub category: String,
    /// Summed actual collection.
    pub total_actual: Decimal,
    /// Summed consolidated-fund payments.
    pub total_payment: Decimal,
    /// Summed retention amounts.
    pub total_retention: Decimal,
    /// Representative remarks for the category.
    pub remarks: Option<String>,
}

/// One revenue report row in presentation shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReportRow {
    /// Canonical display category.
    pub category: String,
    /// Budget projection (not yet captured; always zero).
    pub projection: Decimal,
    /// Actual collection.
    pub actual: Decimal,
    /// Payment to the consolidated fund.
    pub payment: Decimal,
    /// Retained amount.
    pub retention: Decimal,
    /// Year-end projection; currently mirrors the actual collection.
    pub projection_dec: Decimal,
    /// Remarks carried through from the records.
    pub remarks: String,
}

/// Footer totals over a revenue report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReportTotals {
    /// Total projection.
    pub projection: Decimal,
    /// Total actual collection.
    pub actual: Decimal,
    /// Total consolidated-fund payment.
    pub payment: Decimal,
    /// Total retention.
    pub retention: Decimal,
    /// Total year-end projection.
    pub projection_dec: Decimal,
}

/// Canonical display name for a stored revenue category.
#[must_use]
pub fn canonical_category(raw: &str) -> String {
    match raw.to_lowercase().as_str() {
        "fees/charges" => "Fees/Charges".to_string(),
        "fines" | "fines/forfeitures" => "Fines/Forfeitures".to_string(),
        "interests" => "Interests".to_string(),
        "licenses" => "Licenses".to_string(),
        "others" => "Others".to_string(),
        "sale of goods and services" => "Sale Of Goods and Services".to_string(),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_lookup() {
        let table = RetentionTable::new(HashMap::from([
            ("MOF".to_string(), dec!(5)),
            ("GRA".to_string(), dec!(12.5)),
        ]));

        assert_eq!(table.rate_for("MOF"), Some(dec!(5)));
        assert_eq!(table.rate_for("GRA"), Some(dec!(12.5)));
        assert_eq!(table.rate_for("NITA"), None);
    }

    #[test]
    fn test_canonical_category_known_values() {
        assert_eq!(canonical_category("fees/charges"), "Fees/Charges");
        assert_eq!(canonical_category("FINES"), "Fines/Forfeitures");
        assert_eq!(canonical_category("fines/forfeitures"), "Fines/Forfeitures");
        assert_eq!(
            canonical_category("Sale of Goods and Services"),
            "Sale Of Goods and Services"
        );
    }

    #[test]
    fn test_canonical_category_unknown_passthrough() {
        assert_eq!(canonical_category("Royalties"), "Royalties");
    }
}
