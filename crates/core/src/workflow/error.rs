//! Workflow error types.

use thiserror::Error;

use super::types::RecordStatus;

/// Lifecycle transition failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// Record has already been reviewed or approved.
    #[error("This record has already been reviewed")]
    AlreadyReviewed(RecordStatus),

    /// Record has already been approved.
    #[error("This record has already been approved")]
    AlreadyApproved,

    /// Record is reviewed/approved and can no longer be edited or deleted.
    #[error("You cannot modify a reviewed or approved record")]
    ImmutableRecord(RecordStatus),

    /// Caller is neither the record's creator nor an admin.
    #[error("You are not authorized to modify this record")]
    NotRecordOwner,
}
