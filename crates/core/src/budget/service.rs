//! Allotment balance validation.

use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{AllocationAmounts, ConsumptionBasis, PriorConsumption, ProposedAmounts};

/// Stateless service deciding whether a proposed expenditure is
/// permissible against an allocation.
pub struct BudgetService;

impl BudgetService {
    /// Computes the allotment balance that would result from recording
    /// a proposed expenditure, or rejects the entry.
    ///
    /// Policy:
    /// - With no allotment issued (`allotment == 0`) the only check is
    ///   `releases <= appropriation` and the resulting balance is fixed
    ///   at zero.
    /// - Lines tracked by [`ConsumptionBasis::ActualExpenditure`] check
    ///   cumulative actual spend against the allotment.
    /// - All other lines check cumulative releases against the allotment.
    ///
    /// # Errors
    ///
    /// Returns a [`BudgetError`] naming the ceiling that would be
    /// exceeded; the caller must abort the entry without partial writes.
    pub fn allotment_balance(
        allocation: &AllocationAmounts,
        prior: &PriorConsumption,
        proposed: &ProposedAmounts,
        basis: ConsumptionBasis,
    ) -> Result<Decimal, BudgetError> {
        if allocation.allotment.is_zero() {
            if proposed.releases > allocation.appropriation {
                return Err(BudgetError::ReleasesExceedAppropriation {
                    releases: proposed.releases,
                    appropriation: allocation.appropriation,
                });
            }
            return Ok(Decimal::ZERO);
        }

        match basis {
            ConsumptionBasis::ActualExpenditure => {
                let cumulative = prior.actual_expenditure + proposed.actual_expenditure;
                let balance = allocation.allotment - cumulative;
                if balance.is_sign_negative() {
                    return Err(BudgetError::ActualExceedsAllotment {
                        cumulative,
                        allotment: allocation.allotment,
                    });
                }
                Ok(balance)
            }
            ConsumptionBasis::Releases => {
                let cumulative = prior.releases + proposed.releases;
                let balance = allocation.allotment - cumulative;
                if balance.is_sign_negative() {
                    return Err(BudgetError::ReleasesExceedAllotmentBalance {
                        cumulative,
                        allotment: allocation.allotment,
                    });
                }
                Ok(balance)
            }
        }
    }
}
