//! Workflow domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a financial record.
///
/// Valid transitions:
/// - Pending → Reviewed (review)
/// - Pending → Approved (approve)
/// - Reviewed → Approved (approve)
///
/// Approved is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    /// Newly created, awaiting review.
    Pending,
    /// Checked by a reviewer; no longer editable.
    Reviewed,
    /// Approved; terminal and immutable.
    Approved,
}

impl RecordStatus {
    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "reviewed" => Some(Self::Reviewed),
            "approved" => Some(Self::Approved),
            _ => None,
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Reviewed => "Reviewed",
            Self::Approved => "Approved",
        }
    }

    /// Returns true if the record can still be edited or deleted.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true for the terminal status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audit data stamped onto a record when it is reviewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewStamp {
    /// Name of the reviewing user.
    pub reviewed_by: String,
    /// When the review happened.
    pub reviewed_at: DateTime<Utc>,
    /// Optional reviewer comment.
    pub comment: Option<String>,
}

/// Audit data stamped onto a record when it is approved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalStamp {
    /// Name of the approving user.
    pub approved_by: String,
    /// When the approval happened.
    pub approved_at: DateTime<Utc>,
}
