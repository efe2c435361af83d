//! Role-based organization scope resolution.
//!
//! Every read path is scoped to an organization filter derived from the
//! caller's role and the organization they asked for. Non-admins can
//! never widen their scope beyond their home organization.

pub mod error;
pub mod resolver;
pub mod types;

pub use error::AccessError;
pub use resolver::resolve_scope;
pub use types::{Caller, OrgScope, UserRole, ALL_ORGANIZATIONS};
