//! Organization scope resolution.

use super::error::AccessError;
use super::types::{Caller, OrgScope, ALL_ORGANIZATIONS};

/// Derives the effective organization filter for a request.
///
/// Non-admins are always restricted to their home organization; a
/// non-admin asking for the `"ALL"` sentinel is rejected outright.
/// Admins get an unrestricted scope unless they name a specific
/// organization.
///
/// # Errors
///
/// Returns [`AccessError::AllOrganizationsDenied`] when a non-admin
/// requests all organizations.
pub fn resolve_scope(caller: &Caller, requested: Option<&str>) -> Result<OrgScope, AccessError> {
    if !caller.role.is_admin() {
        if requested == Some(ALL_ORGANIZATIONS) {
            return Err(AccessError::AllOrganizationsDenied);
        }
        return Ok(OrgScope::single(caller.organization.clone()));
    }

    match requested {
        None | Some(ALL_ORGANIZATIONS) => Ok(OrgScope::all()),
        Some(organization) => Ok(OrgScope::single(organization)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::types::UserRole;
    use uuid::Uuid;

    fn caller(role: UserRole) -> Caller {
        Caller {
            id: Uuid::new_v4(),
            name: "Ama Mensah".to_string(),
            role,
            organization: "MOF".to_string(),
        }
    }

    #[test]
    fn test_admin_without_request_gets_all() {
        let scope = resolve_scope(&caller(UserRole::Admin), None).unwrap();
        assert_eq!(scope, OrgScope::all());
    }

    #[test]
    fn test_admin_requesting_all_sentinel_gets_all() {
        let scope = resolve_scope(&caller(UserRole::Admin), Some("ALL")).unwrap();
        assert!(scope.is_all);
        assert_eq!(scope.organization, None);
    }

    #[test]
    fn test_admin_requesting_specific_org() {
        let scope = resolve_scope(&caller(UserRole::Admin), Some("GRA")).unwrap();
        assert_eq!(scope, OrgScope::single("GRA"));
    }

    #[test]
    fn test_non_admin_is_forced_to_home_org() {
        for role in [UserRole::Approver, UserRole::Reviewer, UserRole::DataEntry] {
            let scope = resolve_scope(&caller(role), Some("GRA")).unwrap();
            assert_eq!(scope, OrgScope::single("MOF"));
        }
    }

    #[test]
    fn test_non_admin_without_request_gets_home_org() {
        let scope = resolve_scope(&caller(UserRole::DataEntry), None).unwrap();
        assert_eq!(scope, OrgScope::single("MOF"));
    }

    #[test]
    fn test_non_admin_requesting_all_is_rejected() {
        let err = resolve_scope(&caller(UserRole::Reviewer), Some("ALL")).unwrap_err();
        assert_eq!(err, AccessError::AllOrganizationsDenied);
    }
}
