//! Permission query API
//!
//! [`PermissionQuery`] is the read-only surface that guards and the
//! navigation filter consume. Implementors supply the single-token test;
//! the combinators are provided methods so every implementor shares the same
//! empty-list semantics:
//!
//! | Query | Empty list |
//! |-------|------------|
//! | `has_any_permission` | `false` |
//! | `has_all_permissions` | `true` (vacuous truth) |

use crate::identity::RoleId;
use crate::permission::PermissionToken;
use crate::role::Role;

/// Synchronous, side-effect free permission queries.
pub trait PermissionQuery {
    /// True if the current role grants `token`. False when no role is present.
    fn has_permission(&self, token: &PermissionToken) -> bool;

    /// True if the current role's id equals `role_id`.
    fn has_role(&self, role_id: &RoleId) -> bool;

    /// True iff at least one token is granted. Empty input yields `false`.
    fn has_any_permission(&self, tokens: &[PermissionToken]) -> bool {
        tokens.iter().any(|token| self.has_permission(token))
    }

    /// True iff every token is granted. Empty input yields `true`.
    fn has_all_permissions(&self, tokens: &[PermissionToken]) -> bool {
        tokens.iter().all(|token| self.has_permission(token))
    }
}

impl PermissionQuery for Role {
    fn has_permission(&self, token: &PermissionToken) -> bool {
        self.grants(token)
    }

    fn has_role(&self, role_id: &RoleId) -> bool {
        self.id() == role_id
    }
}

impl<T: PermissionQuery + ?Sized> PermissionQuery for &T {
    fn has_permission(&self, token: &PermissionToken) -> bool {
        (**self).has_permission(token)
    }

    fn has_role(&self, role_id: &RoleId) -> bool {
        (**self).has_role(role_id)
    }
}

impl<T: PermissionQuery> PermissionQuery for Option<T> {
    fn has_permission(&self, token: &PermissionToken) -> bool {
        self.as_ref().is_some_and(|inner| inner.has_permission(token))
    }

    fn has_role(&self, role_id: &RoleId) -> bool {
        self.as_ref().is_some_and(|inner| inner.has_role(role_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::{EMPLOYEES_VIEW, LEAVE_APPROVE, PAYROLL_VIEW};

    fn viewer() -> Role {
        Role::new("viewer", "Viewer", "", [EMPLOYEES_VIEW, LEAVE_APPROVE])
    }

    #[test]
    fn test_empty_list_boundaries() {
        let role = viewer();
        assert!(!role.has_any_permission(&[]));
        assert!(role.has_all_permissions(&[]));
    }

    #[test]
    fn test_any_and_all() {
        let role = viewer();
        assert!(role.has_any_permission(&[PAYROLL_VIEW, EMPLOYEES_VIEW]));
        assert!(!role.has_all_permissions(&[PAYROLL_VIEW, EMPLOYEES_VIEW]));
        assert!(role.has_all_permissions(&[LEAVE_APPROVE, EMPLOYEES_VIEW]));
    }

    #[test]
    fn test_absent_role_denies_everything() {
        let absent: Option<&Role> = None;
        assert!(!absent.has_permission(&EMPLOYEES_VIEW));
        assert!(!absent.has_role(&RoleId::new("viewer")));
        assert!(!absent.has_any_permission(&[EMPLOYEES_VIEW]));
        // vacuous truth holds even without a role
        assert!(absent.has_all_permissions(&[]));
    }

    #[test]
    fn test_has_role_matches_id() {
        let role = viewer();
        assert!(role.has_role(&RoleId::new("viewer")));
        assert!(!role.has_role(&RoleId::new("admin")));
    }
}
