//! Property-based tests for the report builder.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::ReportService;
use super::sort::sort_report;
use super::types::{AppropriationAggregate, ExecutionAggregate, FundingFilter};

const CLASSIFICATIONS: [&str; 4] = [
    "Compensation of Employees",
    "Use of Goods and Services",
    "Capital Expenditure",
    "Social Benefits",
];

const SOURCES: [&str; 4] = ["GoG", "IGF", "DPF", "World Bank"];

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_00i64).prop_map(|n| Decimal::new(n, 2))
}

fn appropriation_strategy() -> impl Strategy<Value = AppropriationAggregate> {
    (0..CLASSIFICATIONS.len(), 0..SOURCES.len(), amount_strategy()).prop_map(
        |(class, source, amount)| AppropriationAggregate {
            economic_classification: CLASSIFICATIONS[class].to_string(),
            funding_source: SOURCES[source].to_string(),
            total_appropriation: amount,
        },
    )
}

fn execution_strategy() -> impl Strategy<Value = ExecutionAggregate> {
    (
        0..CLASSIFICATIONS.len(),
        0..SOURCES.len(),
        amount_strategy(),
        amount_strategy(),
        amount_strategy(),
    )
        .prop_map(|(class, source, releases, expenditure, payment)| ExecutionAggregate {
            economic_classification: CLASSIFICATIONS[class].to_string(),
            funding_source: SOURCES[source].to_string(),
            total_releases: releases,
            total_expenditure: expenditure,
            total_payment: payment,
        })
}

fn filter_strategy() -> impl Strategy<Value = FundingFilter> {
    prop_oneof![
        Just(FundingFilter::All),
        (0..SOURCES.len()).prop_map(|i| FundingFilter::Source(SOURCES[i].to_string())),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Building the report twice with identical inputs yields identical
    /// output, including after canonical sorting.
    #[test]
    fn prop_build_and_sort_idempotent(
        appropriations in prop::collection::vec(appropriation_strategy(), 0..12),
        execution in prop::collection::vec(execution_strategy(), 0..12),
        filter in filter_strategy(),
    ) {
        let mut first =
            ReportService::build_economic_report(&appropriations, &execution, &filter);
        let mut second =
            ReportService::build_economic_report(&appropriations, &execution, &filter);
        sort_report(&mut first);
        sort_report(&mut second);

        prop_assert_eq!(first, second);
    }

    /// Every parent's totals equal the sums over its own breakdown rows,
    /// for any inputs and any funding filter.
    #[test]
    fn prop_parent_totals_match_breakdown(
        appropriations in prop::collection::vec(appropriation_strategy(), 0..12),
        execution in prop::collection::vec(execution_strategy(), 0..12),
        filter in filter_strategy(),
    ) {
        let rows = ReportService::build_economic_report(&appropriations, &execution, &filter);

        for parent in &rows {
            let budget: Decimal = parent.breakdown.iter().map(|b| b.total_budget).sum();
            let released: Decimal = parent.breakdown.iter().map(|b| b.amount_released).sum();
            let expenditure: Decimal =
                parent.breakdown.iter().map(|b| b.actual_expenditure).sum();
            let payments: Decimal = parent.breakdown.iter().map(|b| b.actual_payments).sum();

            prop_assert_eq!(parent.total_budget, budget);
            prop_assert_eq!(parent.amount_released, released);
            prop_assert_eq!(parent.actual_expenditure, expenditure);
            prop_assert_eq!(parent.actual_payments, payments);
        }
    }

    /// After filtering on a single source, no other source survives in
    /// any breakdown.
    #[test]
    fn prop_filter_drops_every_other_source(
        appropriations in prop::collection::vec(appropriation_strategy(), 0..12),
        execution in prop::collection::vec(execution_strategy(), 0..12),
        source in 0..SOURCES.len(),
    ) {
        let filter = FundingFilter::Source(SOURCES[source].to_string());
        let rows = ReportService::build_economic_report(&appropriations, &execution, &filter);

        for parent in &rows {
            for child in &parent.breakdown {
                prop_assert_eq!(child.source.as_str(), SOURCES[source]);
            }
        }
    }
}
