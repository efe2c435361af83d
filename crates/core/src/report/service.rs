//! Economic report assembly.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::types::{
    AppropriationAggregate, EconomicReportRow, ExecutionAggregate, FundingBreakdown,
    FundingFilter, ReportTotals,
};

/// Service merging appropriation and execution aggregates into report rows.
pub struct ReportService;

impl ReportService {
    /// Builds the economic report: one row per distinct classification
    /// appearing in either aggregate set, each with a breakdown row per
    /// distinct funding source.
    ///
    /// Execution recorded against a funding source with no corresponding
    /// appropriation gets a zero-budget breakdown entry. After the
    /// funding filter is applied, every parent's totals are recomputed
    /// from its own visible breakdown rows so they can never drift from
    /// what the consumer renders.
    ///
    /// Rows come back in deterministic (classification-name) order; the
    /// canonical presentation order is imposed by [`super::sort::sort_report`].
    #[must_use]
    pub fn build_economic_report(
        appropriations: &[AppropriationAggregate],
        execution: &[ExecutionAggregate],
        filter: &FundingFilter,
    ) -> Vec<EconomicReportRow> {
        let mut map: BTreeMap<String, EconomicReportRow> = BTreeMap::new();

        for row in appropriations {
            let parent = map
                .entry(row.economic_classification.clone())
                .or_insert_with(|| EconomicReportRow::empty(row.economic_classification.clone()));

            let mut child = FundingBreakdown::zeroed(row.funding_source.clone());
            child.total_budget = row.total_appropriation;
            parent.breakdown.push(child);
        }

        for row in execution {
            let parent = map
                .entry(row.economic_classification.clone())
                .or_insert_with(|| EconomicReportRow::empty(row.economic_classification.clone()));

            let index = match parent
                .breakdown
                .iter()
                .position(|b| b.source == row.funding_source)
            {
                Some(index) => index,
                None => {
                    // execution without appropriation
                    parent
                        .breakdown
                        .push(FundingBreakdown::zeroed(row.funding_source.clone()));
                    parent.breakdown.len() - 1
                }
            };

            let child = &mut parent.breakdown[index];
            child.amount_released += row.total_releases;
            child.actual_expenditure += row.total_expenditure;
            child.actual_payments += row.total_payment;
        }

        let mut rows: Vec<EconomicReportRow> = map.into_values().collect();

        for parent in &mut rows {
            parent.breakdown.retain(|b| filter.matches(&b.source));
            Self::recompute_parent_totals(parent);
        }

        rows
    }

    /// Grand totals over the classification rows.
    #[must_use]
    pub fn report_totals(rows: &[EconomicReportRow]) -> ReportTotals {
        let mut totals = ReportTotals::default();
        for row in rows {
            totals.total_budget += row.total_budget;
            totals.amount_released += row.amount_released;
            totals.actual_expenditure += row.actual_expenditure;
            totals.actual_payments += row.actual_payments;
        }
        totals
    }

    fn recompute_parent_totals(parent: &mut EconomicReportRow) {
        parent.total_budget = Decimal::ZERO;
        parent.amount_released = Decimal::ZERO;
        parent.actual_expenditure = Decimal::ZERO;
        parent.actual_payments = Decimal::ZERO;

        for child in &parent.breakdown {
            parent.total_budget += child.total_budget;
            parent.amount_released += child.amount_released;
            parent.actual_expenditure += child.actual_expenditure;
            parent.actual_payments += child.actual_payments;
        }
    }
}
