//! Review/approval lifecycle for financial records.
//!
//! Expenditure, revenue, and cash position records share one
//! three-state lifecycle: `Pending -> Reviewed -> Approved`, terminal
//! once approved. Records stop being editable the moment they are
//! reviewed.

pub mod error;
pub mod service;
pub mod types;

pub use error::WorkflowError;
pub use service::WorkflowService;
pub use types::{ApprovalStamp, RecordStatus, ReviewStamp};
