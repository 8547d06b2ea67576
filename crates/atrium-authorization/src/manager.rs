//! Session Manager
//!
//! Owns the [`Session`] and is its only writer. Identity resolution goes
//! through an [`IdentityEffects`] handler; the manager absorbs every
//! resolution failure (logged at `warn`) and leaves the session anonymous,
//! so callers of the query API never see an error.
//!
//! # Ordering
//!
//! Queries observe the most recently *completed* mutation. While
//! [`load_session`](SessionManager::load_session) or
//! [`refresh_session`](SessionManager::refresh_session) is in flight, queries
//! keep answering from the previous identity/role; only the `loading` flag
//! changes.
//!
//! # Overlapping refreshes
//!
//! Refreshes are neither coalesced nor serialized. No lock is held across
//! the identity call, so when two refreshes overlap the one that *resolves*
//! last wins, even if it was started first. A stale refresh is not
//! cancelled; callers that care about ordering must not overlap calls.

use crate::session::{Session, SessionPhase};
use crate::store::RoleStore;
use atrium_core::effects::{AuthState, IdentityEffects, IdentityError};
use atrium_core::{PermissionQuery, PermissionToken, Role, RoleId, User, UserId};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
struct SessionState {
    session: Session,
    phase: SessionPhase,
    in_flight: usize,
    last_failure: Option<String>,
}

/// Process-wide session state behind a single access point.
pub struct SessionManager<I> {
    identity: I,
    roles: Arc<RoleStore>,
    state: RwLock<SessionState>,
}

impl<I: IdentityEffects> SessionManager<I> {
    /// Create an uninitialized manager. Call [`load_session`](Self::load_session) at startup.
    pub fn new(identity: I, roles: Arc<RoleStore>) -> Self {
        Self {
            identity,
            roles,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Resolve the current identity and role from the identity provider.
    ///
    /// Sets `loading` for the duration of the call. Failures are logged and
    /// leave the session anonymous; they are never returned.
    pub async fn load_session(&self) {
        self.begin_resolution();
        tracing::debug!("resolving session");
        let result = self.identity.auth_state().await;
        self.finish_resolution(result);
    }

    /// Re-run resolution. Same semantics as [`load_session`](Self::load_session).
    pub async fn refresh_session(&self) {
        self.load_session().await;
    }

    /// Override the current role with `role_id` without touching the user.
    ///
    /// Synchronous and local. An unknown id, or a call with no identity
    /// present, leaves the session unchanged: a role is only ever held
    /// together with a user. Returns whether the role was applied.
    pub fn set_role(&self, role_id: &RoleId) -> bool {
        let Some(role) = self.roles.find_role(role_id) else {
            tracing::debug!(role = %role_id, "ignoring override to unknown role");
            return false;
        };

        let mut state = self.state.write();
        if state.session.current_user.is_none() {
            tracing::debug!(role = %role_id, "ignoring role override without an identity");
            return false;
        }
        self.identity.override_role(role_id);
        state.session.current_role = Some(role.clone());
        true
    }

    /// Ask the identity provider to activate `user_id`, then refresh.
    ///
    /// If the provider rejects the switch the failure is logged and the
    /// session is left as it was.
    pub async fn switch_user(&self, user_id: &UserId) {
        if let Err(e) = self.identity.set_current_user(user_id) {
            tracing::warn!(user = %user_id, error = %e, "user switch rejected");
            return;
        }
        self.refresh_session().await;
    }

    /// End the session with the provider, then clear identity and role.
    ///
    /// The local session is cleared even when the provider call fails.
    ///
    /// A resolution still in flight is not cancelled. In that case the phase
    /// stays [`SessionPhase::Loading`] (consistent with `loading`) and the
    /// pending result is applied when it resolves, as with any overlapping
    /// refresh.
    pub async fn logout(&self) {
        if let Err(e) = self.identity.logout().await {
            tracing::warn!(error = %e, "identity provider logout failed");
        }
        let mut state = self.state.write();
        state.session.current_user = None;
        state.session.current_role = None;
        state.last_failure = None;
        state.phase = if state.in_flight > 0 {
            SessionPhase::Loading
        } else {
            SessionPhase::Uninitialized
        };
    }

    fn begin_resolution(&self) {
        let mut state = self.state.write();
        state.in_flight += 1;
        state.session.loading = true;
        state.phase = SessionPhase::Loading;
    }

    fn finish_resolution(&self, result: Result<AuthState, IdentityError>) {
        let (user, role, failure) = match result {
            Ok(auth) => {
                let role = self.resolve_role(&auth);
                (auth.user, role, None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "session resolution failed");
                (None, None, Some(e.to_string()))
            }
        };

        let mut state = self.state.write();
        state.in_flight = state.in_flight.saturating_sub(1);
        state.session.loading = state.in_flight > 0;
        state.session.current_user = user;
        state.session.current_role = role;
        state.last_failure = failure;
        if state.in_flight == 0 {
            state.phase = SessionPhase::Ready;
        }
        tracing::debug!(session = %state.session, "session resolved");
    }

    fn resolve_role(&self, auth: &AuthState) -> Option<Role> {
        auth.user.as_ref()?;
        let role_id = auth.effective_role_id()?;
        let role = self.roles.find_role(role_id).cloned();
        if role.is_none() {
            tracing::warn!(role = %role_id, "identity references an unknown role");
        }
        role
    }
}

impl<I> SessionManager<I> {
    /// Clone of the current session.
    pub fn snapshot(&self) -> Session {
        self.state.read().session.clone()
    }

    /// Clone of the active identity.
    pub fn current_user(&self) -> Option<User> {
        self.state.read().session.current_user.clone()
    }

    /// Clone of the active role.
    pub fn current_role(&self) -> Option<Role> {
        self.state.read().session.current_role.clone()
    }

    /// True when an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().session.is_authenticated()
    }

    /// True while a resolution is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.read().session.loading
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.state.read().phase
    }

    /// Message of the most recent absorbed resolution failure.
    pub fn last_failure(&self) -> Option<String> {
        self.state.read().last_failure.clone()
    }

    /// The role store backing this manager.
    pub fn roles(&self) -> &RoleStore {
        &self.roles
    }

    /// The identity handler.
    pub fn identity(&self) -> &I {
        &self.identity
    }
}

impl<I> PermissionQuery for SessionManager<I> {
    fn has_permission(&self, token: &PermissionToken) -> bool {
        self.state.read().session.has_permission(token)
    }

    fn has_role(&self, role_id: &RoleId) -> bool {
        self.state.read().session.has_role(role_id)
    }

    fn has_any_permission(&self, tokens: &[PermissionToken]) -> bool {
        self.state.read().session.has_any_permission(tokens)
    }

    fn has_all_permissions(&self, tokens: &[PermissionToken]) -> bool {
        self.state.read().session.has_all_permissions(tokens)
    }
}

impl<I> std::fmt::Debug for SessionManager<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("SessionManager")
            .field("session", &state.session)
            .field("phase", &state.phase)
            .finish_non_exhaustive()
    }
}
