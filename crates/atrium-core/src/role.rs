//! Role records
//!
//! A [`Role`] is a named, immutable set of permission tokens. Roles are
//! defined once at startup; switching role reassigns which record is current
//! and never mutates a permission set.

use crate::identity::RoleId;
use crate::permission::PermissionToken;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Named, immutable set of permission tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    permissions: BTreeSet<PermissionToken>,
}

impl Role {
    /// Create a role from its parts.
    pub fn new(
        id: impl Into<RoleId>,
        name: impl Into<String>,
        description: impl Into<String>,
        permissions: impl IntoIterator<Item = PermissionToken>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Role identifier.
    pub fn id(&self) -> &RoleId {
        &self.id
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Longer description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The granted tokens, in sorted order.
    pub fn permissions(&self) -> &BTreeSet<PermissionToken> {
        &self.permissions
    }

    /// Membership test: `token ∈ permissions`.
    pub fn grants(&self, token: &PermissionToken) -> bool {
        self.permissions.contains(token)
    }

    /// True if every token of `self` is also granted by `other`.
    pub fn is_subset_of(&self, other: &Role) -> bool {
        self.permissions.is_subset(&other.permissions)
    }
}
