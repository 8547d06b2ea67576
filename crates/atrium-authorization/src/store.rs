//! Role & Permission Store
//!
//! Holds the immutable role records for the lifetime of the process. The
//! store never fails after construction; lookups only return absence.
//! [`RoleStore::role_has_permission`] is the one membership test every other
//! component delegates to.

use crate::catalog::builtin_roles;
use atrium_core::{AtriumConfig, AtriumError, AtriumResult, PermissionToken, Role, RoleId};
use indexmap::IndexMap;

/// Immutable, ordered collection of roles keyed by id.
#[derive(Debug, Clone)]
pub struct RoleStore {
    roles: IndexMap<RoleId, Role>,
}

impl RoleStore {
    /// Build a store from an explicit role list, rejecting duplicate ids.
    pub fn new(roles: impl IntoIterator<Item = Role>) -> AtriumResult<Self> {
        let mut map = IndexMap::new();
        for role in roles {
            let id = role.id().clone();
            if map.insert(id.clone(), role).is_some() {
                return Err(AtriumError::invalid(format!("duplicate role id '{id}'")));
            }
        }
        Ok(Self { roles: map })
    }

    /// Store holding the built-in HR role catalog.
    pub fn builtin() -> Self {
        Self {
            roles: builtin_roles()
                .into_iter()
                .map(|role| (role.id().clone(), role))
                .collect(),
        }
    }

    /// Store from configuration; falls back to the built-in catalog when the
    /// configuration defines no roles.
    pub fn from_config(config: &AtriumConfig) -> AtriumResult<Self> {
        let roles = config.configured_roles()?;
        if roles.is_empty() {
            return Ok(Self::builtin());
        }
        Self::new(roles)
    }

    /// All roles in definition order.
    pub fn list_roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    /// Look up a role by id.
    pub fn find_role(&self, id: &RoleId) -> Option<&Role> {
        self.roles.get(id)
    }

    /// `token ∈ role.permissions`; an absent role grants nothing.
    pub fn role_has_permission(role: Option<&Role>, token: &PermissionToken) -> bool {
        role.is_some_and(|role| role.grants(token))
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// True if no roles are defined.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleStore {
    fn default() -> Self {
        Self::builtin()
    }
}
