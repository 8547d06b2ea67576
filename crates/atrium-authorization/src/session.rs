//! Session value
//!
//! A [`Session`] is the current identity/role pair plus the loading flag.
//! It is owned exclusively by the [`SessionManager`](crate::SessionManager);
//! everything else sees clones or borrows through the query API.

use crate::store::RoleStore;
use atrium_core::{PermissionQuery, PermissionToken, Role, RoleId, User};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of the session manager.
///
/// ```text
/// Uninitialized ──load──▶ Loading ──resolved──▶ Ready
///       ▲                                        │
///       └──────────────── logout ────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Nothing resolved yet, or logged out
    #[default]
    Uninitialized,
    /// A resolution is in flight
    Loading,
    /// The last resolution completed (successfully or not)
    Ready,
}

impl SessionPhase {
    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Ready => "ready",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current identity, current role and loading status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub(crate) current_user: Option<User>,
    pub(crate) current_role: Option<Role>,
    pub(crate) loading: bool,
}

impl Session {
    /// The active identity, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// The active role, if any.
    pub fn current_role(&self) -> Option<&Role> {
        self.current_role.as_ref()
    }

    /// True while a resolution is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True when an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

impl PermissionQuery for Session {
    fn has_permission(&self, token: &PermissionToken) -> bool {
        RoleStore::role_has_permission(self.current_role.as_ref(), token)
    }

    fn has_role(&self, role_id: &RoleId) -> bool {
        self.current_role
            .as_ref()
            .is_some_and(|role| role.id() == role_id)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.current_user, &self.current_role) {
            (Some(user), Some(role)) => write!(f, "{}@{}", user.id, role.id()),
            (Some(user), None) => write!(f, "{}@<no role>", user.id),
            (None, Some(role)) => write!(f, "anonymous@{}", role.id()),
            (None, None) => f.write_str("anonymous"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::permissions::{EMPLOYEES_VIEW, PAYROLL_VIEW};

    #[test]
    fn test_default_session_is_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(!session.is_loading());
        assert!(!session.has_permission(&EMPLOYEES_VIEW));
        assert_eq!(session.to_string(), "anonymous");
    }

    #[test]
    fn test_session_queries_current_role() {
        let session = Session {
            current_user: Some(User::new("u-1", "viewer", "Ada")),
            current_role: Some(Role::new("viewer", "Viewer", "", [EMPLOYEES_VIEW])),
            loading: false,
        };
        assert!(session.is_authenticated());
        assert!(session.has_permission(&EMPLOYEES_VIEW));
        assert!(!session.has_permission(&PAYROLL_VIEW));
        assert!(session.has_role(&RoleId::new("viewer")));
        assert_eq!(session.to_string(), "u-1@viewer");
    }
}
