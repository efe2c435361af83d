//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Every repository takes an injected
//! [`sea_orm::DatabaseConnection`]; there is no shared global handle.

pub mod allocation;
pub mod cash;
pub mod expenditure;
pub mod report;
pub mod revenue;

pub use allocation::{
    AllocationError, AllocationRepository, BudgetValues, CreateAllocationInput,
};
pub use cash::{CashError, CashPositionReport, CashRepository, CreateCashPositionInput};
pub use expenditure::{CreateExpenditureInput, ExpenditureError, ExpenditureRepository};
pub use report::{EconomicReport, ReportRepository};
pub use revenue::{
    CreateRevenueInput, RevenueRepository, RevenueReport, RevenueRepositoryError,
    UpdateRevenueInput,
};
