//! Multi-currency cash position grouping.

pub mod service;
pub mod types;

pub use service::CashService;
pub use types::{CashAccountRow, CashBalance, CashCurrency, CashTotals};
