//! Property-based tests for the balance validator.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::BudgetService;
use super::types::{AllocationAmounts, ConsumptionBasis, PriorConsumption, ProposedAmounts};

/// Strategy for non-negative amounts with two decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_00i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// With a positive allotment and the releases basis, the entry is
    /// accepted exactly when cumulative releases stay within the
    /// allotment, and the balance is the remaining headroom.
    #[test]
    fn prop_releases_basis_balance_is_headroom(
        allotment in amount_strategy(),
        prior in amount_strategy(),
        proposed in amount_strategy(),
    ) {
        prop_assume!(!allotment.is_zero());

        let result = BudgetService::allotment_balance(
            &AllocationAmounts { appropriation: allotment * Decimal::TWO, allotment },
            &PriorConsumption { releases: prior, actual_expenditure: Decimal::ZERO },
            &ProposedAmounts { releases: proposed, actual_expenditure: Decimal::ZERO },
            ConsumptionBasis::Releases,
        );

        let cumulative = prior + proposed;
        if cumulative <= allotment {
            prop_assert_eq!(result.unwrap(), allotment - cumulative);
        } else {
            prop_assert!(result.is_err());
        }
    }

    /// Same property for the actual-expenditure basis.
    #[test]
    fn prop_actual_basis_balance_is_headroom(
        allotment in amount_strategy(),
        prior in amount_strategy(),
        proposed in amount_strategy(),
    ) {
        prop_assume!(!allotment.is_zero());

        let result = BudgetService::allotment_balance(
            &AllocationAmounts { appropriation: allotment * Decimal::TWO, allotment },
            &PriorConsumption { releases: Decimal::ZERO, actual_expenditure: prior },
            &ProposedAmounts { releases: Decimal::ZERO, actual_expenditure: proposed },
            ConsumptionBasis::ActualExpenditure,
        );

        let cumulative = prior + proposed;
        if cumulative <= allotment {
            prop_assert_eq!(result.unwrap(), allotment - cumulative);
        } else {
            prop_assert!(result.is_err());
        }
    }

    /// With no allotment the balance is always zero on success, and the
    /// entry is accepted exactly when releases fit the appropriation.
    #[test]
    fn prop_zero_allotment_balance_always_zero(
        appropriation in amount_strategy(),
        releases in amount_strategy(),
    ) {
        let result = BudgetService::allotment_balance(
            &AllocationAmounts { appropriation, allotment: Decimal::ZERO },
            &PriorConsumption::default(),
            &ProposedAmounts { releases, actual_expenditure: Decimal::ZERO },
            ConsumptionBasis::Releases,
        );

        if releases <= appropriation {
            prop_assert_eq!(result.unwrap(), Decimal::ZERO);
        } else {
            prop_assert!(result.is_err());
        }
    }
}
