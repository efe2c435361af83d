//! Retention split and revenue report grouping.

pub mod error;
pub mod service;
pub mod types;

pub use error::RevenueError;
pub use service::RevenueService;
pub use types::{
    RetentionSplit, RetentionTable, RevenueAggregate, RevenueReportRow, RevenueReportTotals,
};
