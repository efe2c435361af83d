//! Access control domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel organization value meaning "all organizations".
pub const ALL_ORGANIZATIONS: &str = "ALL";

/// User role in the budget workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access across all organizations.
    Admin,
    /// Can approve reviewed records within their organization.
    Approver,
    /// Can review pending records within their organization.
    Reviewer,
    /// Can create expenditure, revenue, and cash records.
    DataEntry,
}

impl UserRole {
    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "approver" => Some(Self::Approver),
            "reviewer" => Some(Self::Reviewer),
            "data_entry" => Some(Self::DataEntry),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Approver => "approver",
            Self::Reviewer => "reviewer",
            Self::DataEntry => "data_entry",
        }
    }

    /// Returns true for the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authenticated caller of an operation.
#[derive(Debug, Clone)]
pub struct Caller {
    /// User id.
    pub id: Uuid,
    /// Display name, stamped onto reviewed/approved records.
    pub name: String,
    /// Caller's role.
    pub role: UserRole,
    /// Caller's home organization code.
    pub organization: String,
}

/// Resolved organization filter for a request.
///
/// `organization: None` means no filter (all organizations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgScope {
    /// Organization to filter by, or `None` for all organizations.
    pub organization: Option<String>,
    /// True when the scope covers all organizations.
    pub is_all: bool,
}

impl OrgScope {
    /// Scope restricted to a single organization.
    #[must_use]
    pub fn single(organization: impl Into<String>) -> Self {
        Self {
            organization: Some(organization.into()),
            is_all: false,
        }
    }

    /// Unrestricted scope covering all organizations.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            organization: None,
            is_all: true,
        }
    }
}
