//! Allotment balance validation for expenditure entry.
//!
//! This module implements the decision core of the expenditure-creation
//! guard: given an allocation's ceilings and the cumulative consumption
//! already recorded against a budget line, decide whether a proposed
//! release/expenditure is permissible and compute the resulting balance.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::BudgetError;
pub use service::BudgetService;
pub use types::{
    AllocationAmounts, BudgetLineKey, ConsumptionBasis, PriorConsumption, ProposedAmounts,
    DOMESTIC_FUNDING, GOODS_AND_SERVICES,
};
