//! Cash position grouping.

use std::collections::BTreeMap;

use super::types::{CashAccountRow, CashBalance, CashTotals};

/// Stateless service grouping raw cash balances for the position report.
pub struct CashService;

impl CashService {
    /// Groups raw per-currency balance rows into one row per account,
    /// summing balances per currency column. Accounts come back in
    /// account-name order.
    ///
    /// The persisted uniqueness constraint normally prevents duplicate
    /// (account, currency) snapshots, but duplicates are summed rather
    /// than rejected here.
    #[must_use]
    pub fn group_positions(rows: &[CashBalance]) -> Vec<CashAccountRow> {
        let mut grouped: BTreeMap<String, CashAccountRow> = BTreeMap::new();

        for row in rows {
            grouped
                .entry(row.account_name.clone())
                .or_insert_with(|| CashAccountRow::zeroed(row.account_name.clone()))
                .accumulate(row.currency, row.balance);
        }

        grouped.into_values().collect()
    }

    /// Grand totals per currency across all account rows.
    #[must_use]
    pub fn position_totals(rows: &[CashAccountRow]) -> CashTotals {
        let mut totals = CashTotals::default();
        for row in rows {
            totals.ghs += row.ghs;
            totals.usd += row.usd;
            totals.gbp += row.gbp;
            totals.eur += row.eur;
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cash::types::CashCurrency;
    use rust_decimal_macros::dec;

    fn balance(account: &str, currency: CashCurrency, amount: &str) -> CashBalance {
        CashBalance {
            account_name: account.to_string(),
            currency,
            balance: amount.parse().unwrap(),
        }
    }

    #[test]
    fn test_group_positions_one_row_per_account() {
        let rows = CashService::group_positions(&[
            balance("Salaries", CashCurrency::Ghs, "120000"),
            balance("Operations", CashCurrency::Ghs, "50000"),
            balance("Operations", CashCurrency::Usd, "8000"),
            balance("Operations", CashCurrency::Eur, "1200"),
        ]);

        assert_eq!(rows.len(), 2);
        // account-name order
        assert_eq!(rows[0].account_name, "Operations");
        assert_eq!(rows[1].account_name, "Salaries");

        assert_eq!(rows[0].ghs, dec!(50000));
        assert_eq!(rows[0].usd, dec!(8000));
        assert_eq!(rows[0].eur, dec!(1200));
        assert_eq!(rows[0].gbp, dec!(0));

        assert_eq!(rows[1].ghs, dec!(120000));
    }

    #[test]
    fn test_group_positions_sums_duplicate_snapshots() {
        let rows = CashService::group_positions(&[
            balance("Operations", CashCurrency::Usd, "8000"),
            balance("Operations", CashCurrency::Usd, "2000"),
        ]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].usd, dec!(10000));
    }

    #[test]
    fn test_position_totals_sums_each_currency_column() {
        let grouped = CashService::group_positions(&[
            balance("Salaries", CashCurrency::Ghs, "120000"),
            balance("Operations", CashCurrency::Ghs, "50000"),
            balance("Operations", CashCurrency::Usd, "8000"),
            balance("Donor", CashCurrency::Gbp, "3000"),
        ]);

        let totals = CashService::position_totals(&grouped);
        assert_eq!(totals.ghs, dec!(170000));
        assert_eq!(totals.usd, dec!(8000));
        assert_eq!(totals.gbp, dec!(3000));
        assert_eq!(totals.eur, dec!(0));
    }

    #[test]
    fn test_group_positions_empty_input() {
        let rows = CashService::group_positions(&[]);
        assert!(rows.is_empty());
        assert_eq!(CashService::position_totals(&rows), CashTotals::default());
    }
}
