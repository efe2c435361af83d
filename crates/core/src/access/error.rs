//! Access control error types.

use thiserror::Error;

/// Errors raised while resolving an organization scope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// A non-admin requested data across all organizations.
    #[error("You are not allowed to access all organizations")]
    AllOrganizationsDenied,
}
