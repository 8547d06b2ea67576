//! In-memory identity provider and user directory.
//!
//! One handler backs both collaborators: the directory holds the user
//! records and the identity side tracks which of them is active.

use async_trait::async_trait;
use atrium_core::effects::{
    AuthState, DirectoryError, IdentityEffects, IdentityError, UserDirectoryEffects,
};
use atrium_core::{RoleId, User, UserId};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct IdentityState {
    users: IndexMap<UserId, User>,
    current: Option<UserId>,
    role_override: Option<RoleId>,
    fail_next: Option<IdentityError>,
    unavailable: Option<String>,
    latency: Option<Duration>,
}

impl IdentityState {
    fn take_failure(&mut self) -> Option<IdentityError> {
        if let Some(err) = self.fail_next.take() {
            return Some(err);
        }
        self.unavailable
            .as_ref()
            .map(|reason| IdentityError::Unavailable {
                reason: reason.clone(),
            })
    }
}

/// In-memory handler for [`IdentityEffects`] and [`UserDirectoryEffects`].
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityHandler {
    state: Arc<Mutex<IdentityState>>,
}

impl InMemoryIdentityHandler {
    /// Create an empty handler with no users and nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler seeded with `users`. Later duplicates replace earlier ones.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let handler = Self::new();
        {
            let mut state = handler.state.lock();
            for user in users {
                state.users.insert(user.id.clone(), user);
            }
        }
        handler
    }

    /// Sign `user_id` in, builder style. Unknown ids are ignored.
    pub fn signed_in_as(self, user_id: impl Into<UserId>) -> Self {
        let user_id = user_id.into();
        if let Err(e) = self.set_current_user(&user_id) {
            tracing::debug!(user = %user_id, error = %e, "seed sign-in ignored");
        }
        self
    }

    /// Fail the next `auth_state` or `logout` call with `err`.
    pub fn fail_next(&self, err: IdentityError) {
        self.state.lock().fail_next = Some(err);
    }

    /// Make every `auth_state` and `logout` call fail until cleared with `None`.
    pub fn set_unavailable(&self, reason: Option<String>) {
        self.state.lock().unavailable = reason;
    }

    /// Delay every async call by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.state.lock().latency = latency;
    }

    /// The active user id, if any.
    pub fn current_user_id(&self) -> Option<UserId> {
        self.state.lock().current.clone()
    }

    /// The locally overridden role, if any.
    pub fn role_override(&self) -> Option<RoleId> {
        self.state.lock().role_override.clone()
    }

    async fn simulate_latency(&self) {
        let latency = self.state.lock().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl IdentityEffects for InMemoryIdentityHandler {
    async fn auth_state(&self) -> Result<AuthState, IdentityError> {
        self.simulate_latency().await;

        let mut state = self.state.lock();
        if let Some(err) = state.take_failure() {
            return Err(err);
        }
        let Some(user_id) = state.current.clone() else {
            return Ok(AuthState::anonymous());
        };
        let user = state
            .users
            .get(&user_id)
            .cloned()
            .ok_or(IdentityError::UnknownUser { user_id })?;
        let role_id = state
            .role_override
            .clone()
            .unwrap_or_else(|| user.role_id.clone());
        Ok(AuthState {
            user: Some(user),
            role_id: Some(role_id),
        })
    }

    fn override_role(&self, role_id: &RoleId) {
        self.state.lock().role_override = Some(role_id.clone());
    }

    fn set_current_user(&self, user_id: &UserId) -> Result<(), IdentityError> {
        let mut state = self.state.lock();
        if !state.users.contains_key(user_id) {
            return Err(IdentityError::UnknownUser {
                user_id: user_id.clone(),
            });
        }
        state.current = Some(user_id.clone());
        state.role_override = None;
        Ok(())
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        self.simulate_latency().await;

        let mut state = self.state.lock();
        let failure = state.take_failure();
        state.current = None;
        state.role_override = None;
        failure.map_or(Ok(()), Err)
    }
}

#[async_trait]
impl UserDirectoryEffects for InMemoryIdentityHandler {
    async fn list_users(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.state.lock().users.values().cloned().collect())
    }

    async fn get_user(&self, user_id: &UserId) -> Result<User, DirectoryError> {
        self.state
            .lock()
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound {
                user_id: user_id.clone(),
            })
    }

    async fn create_user(&self, user: User) -> Result<User, DirectoryError> {
        let mut state = self.state.lock();
        if state.users.contains_key(&user.id) {
            return Err(DirectoryError::AlreadyExists { user_id: user.id });
        }
        state.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User, DirectoryError> {
        let mut state = self.state.lock();
        let Some(slot) = state.users.get_mut(&user.id) else {
            return Err(DirectoryError::NotFound { user_id: user.id });
        };
        *slot = user.clone();
        Ok(user)
    }

    async fn delete_user(&self, user_id: &UserId) -> Result<User, DirectoryError> {
        let mut state = self.state.lock();
        let removed = state
            .users
            .shift_remove(user_id)
            .ok_or_else(|| DirectoryError::NotFound {
                user_id: user_id.clone(),
            })?;
        if state.current.as_ref() == Some(user_id) {
            state.current = None;
            state.role_override = None;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> InMemoryIdentityHandler {
        InMemoryIdentityHandler::with_users([
            User::new("u-1", "employee", "Ada"),
            User::new("u-2", "admin", "Grace"),
        ])
    }

    #[tokio::test]
    async fn test_anonymous_until_signed_in() {
        let handler = handler();
        assert_eq!(handler.auth_state().await.unwrap(), AuthState::anonymous());

        handler.set_current_user(&UserId::new("u-1")).unwrap();
        let auth = handler.auth_state().await.unwrap();
        assert_eq!(auth.user.unwrap().display_name, "Ada");
        assert_eq!(auth.role_id, Some(RoleId::new("employee")));
    }

    #[tokio::test]
    async fn test_override_is_reported_and_reset_on_switch() {
        let handler = handler().signed_in_as("u-1");
        handler.override_role(&RoleId::new("admin"));
        assert_eq!(
            handler.auth_state().await.unwrap().role_id,
            Some(RoleId::new("admin"))
        );

        handler.set_current_user(&UserId::new("u-2")).unwrap();
        assert_eq!(handler.role_override(), None);
    }

    #[tokio::test]
    async fn test_unknown_user_rejected() {
        let handler = handler();
        let err = handler.set_current_user(&UserId::new("ghost")).unwrap_err();
        assert!(matches!(err, IdentityError::UnknownUser { .. }));
        assert_eq!(handler.current_user_id(), None);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let handler = handler().signed_in_as("u-1");
        handler.fail_next(IdentityError::Rejected {
            reason: "expired".into(),
        });
        assert!(handler.auth_state().await.is_err());
        assert!(handler.auth_state().await.is_ok());

        handler.set_unavailable(Some("offline".into()));
        assert!(handler.auth_state().await.is_err());
        assert!(handler.auth_state().await.is_err());
        handler.set_unavailable(None);
        assert!(handler.auth_state().await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_clears_even_on_failure() {
        let handler = handler().signed_in_as("u-2");
        handler.fail_next(IdentityError::Unavailable {
            reason: "timeout".into(),
        });
        assert!(handler.logout().await.is_err());
        assert_eq!(handler.current_user_id(), None);
    }

    #[tokio::test]
    async fn test_directory_crud() {
        let handler = handler();
        assert_eq!(handler.list_users().await.unwrap().len(), 2);

        let err = handler
            .create_user(User::new("u-1", "admin", "Dup"))
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::AlreadyExists { .. }));

        handler
            .create_user(User::new("u-3", "hr_manager", "Linus"))
            .await
            .unwrap();
        let mut updated = handler.get_user(&UserId::new("u-3")).await.unwrap();
        updated.display_name = "Linus T.".into();
        handler.update_user(updated).await.unwrap();
        assert_eq!(
            handler.get_user(&UserId::new("u-3")).await.unwrap().display_name,
            "Linus T."
        );

        handler.delete_user(&UserId::new("u-3")).await.unwrap();
        assert!(handler.get_user(&UserId::new("u-3")).await.is_err());
    }

    #[tokio::test]
    async fn test_deleting_active_user_signs_out() {
        let handler = handler().signed_in_as("u-1");
        handler.delete_user(&UserId::new("u-1")).await.unwrap();
        assert_eq!(handler.auth_state().await.unwrap(), AuthState::anonymous());
    }
}
