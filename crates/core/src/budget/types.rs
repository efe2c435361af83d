//! Budget line domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Economic classification tracked by cumulative actual spend when
/// funded domestically.
pub const GOODS_AND_SERVICES: &str = "Use of Goods and Services";

/// Domestic (Government of Ghana) funding source code.
pub const DOMESTIC_FUNDING: &str = "GoG";

/// Identifies one budget line: the unique allocation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BudgetLineKey {
    /// Owning organization code.
    pub organization: String,
    /// Economic classification (e.g., "Compensation of Employees").
    pub economic_classification: String,
    /// Funding source code (GoG, IGF, DPF).
    pub funding_source: String,
    /// Natural account number.
    pub natural_account: String,
}

/// Ceilings copied from the allocation for a budget line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationAmounts {
    /// Approved budget ceiling for the year.
    pub appropriation: Decimal,
    /// In-year release ceiling; zero when no allotment has been issued.
    pub allotment: Decimal,
}

/// Cumulative consumption already recorded against a budget line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorConsumption {
    /// Sum of previous releases.
    pub releases: Decimal,
    /// Sum of previous actual expenditure.
    pub actual_expenditure: Decimal,
}

/// Amounts proposed by a new expenditure entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProposedAmounts {
    /// Cash release requested by this entry.
    pub releases: Decimal,
    /// Actual expenditure recorded by this entry.
    pub actual_expenditure: Decimal,
}

/// Which consumption metric a budget line is checked against.
///
/// Goods and services funded domestically are tracked by cumulative
/// actual spend; every other line is tracked by cumulative cash
/// released. Both are checked against the same allotment ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionBasis {
    /// Checked against cumulative releases.
    Releases,
    /// Checked against cumulative actual expenditure.
    ActualExpenditure,
}

impl ConsumptionBasis {
    /// Selects the consumption basis for a budget line.
    #[must_use]
    pub fn for_line(economic_classification: &str, funding_source: &str) -> Self {
        if economic_classification == GOODS_AND_SERVICES
            && funding_source.eq_ignore_ascii_case(DOMESTIC_FUNDING)
        {
            Self::ActualExpenditure
        } else {
            Self::Releases
        }
    }
}
