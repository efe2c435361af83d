//! Workflow state transitions.

use chrono::Utc;
use uuid::Uuid;

use crate::access::UserRole;

use super::error::WorkflowError;
use super::types::{ApprovalStamp, RecordStatus, ReviewStamp};

/// Stateless service validating and executing lifecycle transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Reviews a pending record.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::AlreadyReviewed`] when the record has
    /// already been reviewed or approved.
    pub fn review(
        current_status: RecordStatus,
        reviewer_name: &str,
        comment: Option<String>,
    ) -> Result<ReviewStamp, WorkflowError> {
        match current_status {
            RecordStatus::Pending => Ok(ReviewStamp {
                reviewed_by: reviewer_name.to_string(),
                reviewed_at: Utc::now(),
                comment,
            }),
            RecordStatus::Reviewed | RecordStatus::Approved => {
                Err(WorkflowError::AlreadyReviewed(current_status))
            }
        }
    }

    /// Approves a pending or reviewed record.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::AlreadyApproved`] when the record is
    /// already in the terminal status.
    pub fn approve(
        current_status: RecordStatus,
        approver_name: &str,
    ) -> Result<ApprovalStamp, WorkflowError> {
        match current_status {
            RecordStatus::Pending | RecordStatus::Reviewed => Ok(ApprovalStamp {
                approved_by: approver_name.to_string(),
                approved_at: Utc::now(),
            }),
            RecordStatus::Approved => Err(WorkflowError::AlreadyApproved),
        }
    }

    /// Guards edit/delete operations: only pending records can change.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::ImmutableRecord`] once the record has
    /// been reviewed or approved.
    pub fn ensure_editable(current_status: RecordStatus) -> Result<(), WorkflowError> {
        if current_status.is_editable() {
            Ok(())
        } else {
            Err(WorkflowError::ImmutableRecord(current_status))
        }
    }

    /// Guards edit/delete operations: only the creator or an admin may
    /// touch a record.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotRecordOwner`] for any other caller.
    pub fn ensure_can_modify(
        record_creator: Uuid,
        caller_id: Uuid,
        caller_role: UserRole,
    ) -> Result<(), WorkflowError> {
        if record_creator == caller_id || caller_role.is_admin() {
            Ok(())
        } else {
            Err(WorkflowError::NotRecordOwner)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_pending_record() {
        let stamp =
            WorkflowService::review(RecordStatus::Pending, "Kofi Boateng", Some("ok".into()))
                .unwrap();
        assert_eq!(stamp.reviewed_by, "Kofi Boateng");
        assert_eq!(stamp.comment.as_deref(), Some("ok"));
    }

    #[test]
    fn test_review_reviewed_record_fails() {
        let err = WorkflowService::review(RecordStatus::Reviewed, "Kofi Boateng", None)
            .unwrap_err();
        assert_eq!(err, WorkflowError::AlreadyReviewed(RecordStatus::Reviewed));
    }

    #[test]
    fn test_review_approved_record_fails() {
        let err =
            WorkflowService::review(RecordStatus::Approved, "Kofi Boateng", None).unwrap_err();
        assert_eq!(err, WorkflowError::AlreadyReviewed(RecordStatus::Approved));
    }

    #[test]
    fn test_approve_from_pending_and_reviewed() {
        assert!(WorkflowService::approve(RecordStatus::Pending, "Esi Owusu").is_ok());
        assert!(WorkflowService::approve(RecordStatus::Reviewed, "Esi Owusu").is_ok());
    }

    #[test]
    fn test_approve_is_not_repeatable() {
        let err = WorkflowService::approve(RecordStatus::Approved, "Esi Owusu").unwrap_err();
        assert_eq!(err, WorkflowError::AlreadyApproved);
    }

    #[test]
    fn test_ensure_editable() {
        assert!(WorkflowService::ensure_editable(RecordStatus::Pending).is_ok());
        assert_eq!(
            WorkflowService::ensure_editable(RecordStatus::Reviewed).unwrap_err(),
            WorkflowError::ImmutableRecord(RecordStatus::Reviewed)
        );
        assert_eq!(
            WorkflowService::ensure_editable(RecordStatus::Approved).unwrap_err(),
            WorkflowError::ImmutableRecord(RecordStatus::Approved)
        );
    }

    #[test]
    fn test_ensure_can_modify() {
        let creator = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert!(WorkflowService::ensure_can_modify(creator, creator, UserRole::DataEntry).is_ok());
        assert!(WorkflowService::ensure_can_modify(creator, other, UserRole::Admin).is_ok());
        assert_eq!(
            WorkflowService::ensure_can_modify(creator, other, UserRole::DataEntry).unwrap_err(),
            WorkflowError::NotRecordOwner
        );
    }
}
