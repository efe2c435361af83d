//! Revenue computations and report grouping.

use rust_decimal::Decimal;

use super::error::RevenueError;
use super::types::{
    canonical_category, RetentionSplit, RevenueAggregate, RevenueReportRow, RevenueReportTotals,
};

/// Stateless service for revenue derivations.
pub struct RevenueService;

impl RevenueService {
    /// Splits an actual collection into retention and consolidated-fund
    /// payment using the organization's retention percentage.
    ///
    /// Both derived amounts are rounded to two decimal places, with the
    /// payment defined as the exact remainder of the collection.
    ///
    /// # Errors
    ///
    /// Rejects negative collections and negative rates.
    pub fn split_collection(
        actual_collection: Decimal,
        retention_rate: Decimal,
    ) -> Result<RetentionSplit, RevenueError> {
        if actual_collection.is_sign_negative() {
            return Err(RevenueError::NegativeCollection(actual_collection));
        }
        if retention_rate.is_sign_negative() {
            return Err(RevenueError::InvalidRetentionRate(retention_rate));
        }

        let retention_amount =
            (retention_rate / Decimal::ONE_HUNDRED * actual_collection).round_dp(2);
        let payment_amount = (actual_collection - retention_amount).round_dp(2);

        Ok(RetentionSplit {
            retention_amount,
            payment_amount,
        })
    }

    /// Reshapes quarterly revenue aggregates into presentation rows.
    ///
    /// Categories are mapped to their canonical display names; the
    /// year-end projection currently mirrors the actual collection.
    #[must_use]
    pub fn group_revenue(aggregates: &[RevenueAggregate]) -> Vec<RevenueReportRow> {
        aggregates
            .iter()
            .map(|row| RevenueReportRow {
                category: canonical_category(&row.category),
                projection: Decimal::ZERO,
                actual: row.total_actual,
                payment: row.total_payment,
                retention: row.total_retention,
                projection_dec: row.total_actual,
                remarks: row.remarks.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// Footer totals over revenue report rows.
    #[must_use]
    pub fn revenue_totals(rows: &[RevenueReportRow]) -> RevenueReportTotals {
        let mut totals = RevenueReportTotals::default();
        for row in rows {
            totals.projection += row.projection;
            totals.actual += row.actual;
            totals.payment += row.payment;
            totals.retention += row.retention;
            totals.projection_dec += row.projection_dec;
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_split_collection_standard_rate() {
        let split = RevenueService::split_collection(dec!(10000), dec!(5)).unwrap();
        assert_eq!(split.retention_amount, dec!(500.00));
        assert_eq!(split.payment_amount, dec!(9500.00));
    }

    #[rstest]
    #[case(dec!(0), dec!(5), dec!(0), dec!(0))]
    #[case(dec!(10000), dec!(0), dec!(0), dec!(10000))]
    #[case(dec!(333.33), dec!(10), dec!(33.33), dec!(300.00))]
    #[case(dec!(100), dec!(12.5), dec!(12.50), dec!(87.50))]
    fn test_split_collection_cases(
        #[case] collection: Decimal,
        #[case] rate: Decimal,
        #[case] retention: Decimal,
        #[case] payment: Decimal,
    ) {
        let split = RevenueService::split_collection(collection, rate).unwrap();
        assert_eq!(split.retention_amount, retention);
        assert_eq!(split.payment_amount, payment);
    }

    #[test]
    fn test_split_collection_rejects_negative_collection() {
        let err = RevenueService::split_collection(dec!(-1), dec!(5)).unwrap_err();
        assert_eq!(err, RevenueError::NegativeCollection(dec!(-1)));
    }

    #[test]
    fn test_split_collection_rejects_negative_rate() {
        let err = RevenueService::split_collection(dec!(100), dec!(-5)).unwrap_err();
        assert_eq!(err, RevenueError::InvalidRetentionRate(dec!(-5)));
    }

    #[test]
    fn test_group_revenue_maps_categories() {
        let rows = RevenueService::group_revenue(&[RevenueAggregate {
            category: "fines".to_string(),
            total_actual: dec!(2000),
            total_payment: dec!(1900),
            total_retention: dec!(100),
            remarks: Some("court fines".to_string()),
        }]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Fines/Forfeitures");
        assert_eq!(rows[0].projection, dec!(0));
        assert_eq!(rows[0].projection_dec, dec!(2000));
        assert_eq!(rows[0].remarks, "court fines");
    }

    #[test]
    fn test_revenue_totals() {
        let rows = RevenueService::group_revenue(&[
            RevenueAggregate {
                category: "licenses".to_string(),
                total_actual: dec!(1500),
                total_payment: dec!(1425),
                total_retention: dec!(75),
                remarks: None,
            },
            RevenueAggregate {
                category: "others".to_string(),
                total_actual: dec!(500),
                total_payment: dec!(475),
                total_retention: dec!(25),
                remarks: None,
            },
        ]);

        let totals = RevenueService::revenue_totals(&rows);
        assert_eq!(totals.actual, dec!(2000));
        assert_eq!(totals.payment, dec!(1900));
        assert_eq!(totals.retention, dec!(100));
        assert_eq!(totals.projection_dec, dec!(2000));
        assert_eq!(totals.projection, dec!(0));
    }
}
