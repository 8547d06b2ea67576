//! Identity provider effects.

use crate::errors::AtriumError;
use crate::identity::{RoleId, User, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type for identity provider operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum IdentityError {
    #[error("Identity provider unavailable: {reason}")]
    Unavailable { reason: String },
    #[error("Unknown user: {user_id}")]
    UnknownUser { user_id: UserId },
    #[error("Session rejected: {reason}")]
    Rejected { reason: String },
}

impl From<IdentityError> for AtriumError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::UnknownUser { user_id } => {
                AtriumError::not_found(format!("user '{user_id}'"))
            }
            other => AtriumError::identity(other.to_string()),
        }
    }
}

/// Resolved authentication state.
///
/// `role_id` is the role the provider reports as active. It is the user's own
/// `role_id` unless a local override is in force.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    /// The active identity, if any
    pub user: Option<User>,
    /// The active role id, if any
    pub role_id: Option<RoleId>,
}

impl AuthState {
    /// State with no active identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// State for `user` holding their own role.
    pub fn for_user(user: User) -> Self {
        let role_id = Some(user.role_id.clone());
        Self {
            user: Some(user),
            role_id,
        }
    }

    /// Role id the session should resolve: the reported one, else the user's own.
    pub fn effective_role_id(&self) -> Option<&RoleId> {
        self.role_id
            .as_ref()
            .or_else(|| self.user.as_ref().map(|user| &user.role_id))
    }
}

/// Identity provider operations.
#[async_trait]
pub trait IdentityEffects: Send + Sync {
    /// Resolve the current identity and role.
    async fn auth_state(&self) -> Result<AuthState, IdentityError>;

    /// Record a local role override. Never contacts a backend.
    fn override_role(&self, role_id: &RoleId);

    /// Make `user_id` the active identity.
    fn set_current_user(&self, user_id: &UserId) -> Result<(), IdentityError>;

    /// End the session with the provider.
    async fn logout(&self) -> Result<(), IdentityError>;
}

#[async_trait]
impl<T: IdentityEffects + ?Sized> IdentityEffects for std::sync::Arc<T> {
    async fn auth_state(&self) -> Result<AuthState, IdentityError> {
        (**self).auth_state().await
    }

    fn override_role(&self, role_id: &RoleId) {
        (**self).override_role(role_id);
    }

    fn set_current_user(&self, user_id: &UserId) -> Result<(), IdentityError> {
        (**self).set_current_user(user_id)
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        (**self).logout().await
    }
}
