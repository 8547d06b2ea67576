//! Session manager behaviour against in-memory and gated identity providers.

use async_trait::async_trait;
use atrium_authorization::catalog::role_ids;
use atrium_authorization::{Guard, Requirement, RoleStore, SessionManager, SessionPhase};
use atrium_core::effects::{AuthState, IdentityEffects, IdentityError};
use atrium_core::permissions::{
    EMPLOYEES_CREATE, EMPLOYEES_VIEW, PAYROLL_VIEW, ROLES_MANAGE, USERS_MANAGE,
};
use atrium_core::{PermissionQuery, RoleId, User, UserId};
use atrium_effects::InMemoryIdentityHandler;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

fn directory() -> InMemoryIdentityHandler {
    InMemoryIdentityHandler::with_users([
        User::new("u-admin", role_ids::ADMIN, "Morgan Admin"),
        User::new("u-hr", role_ids::HR_MANAGER, "Hana HR"),
        User::new("u-emp", role_ids::EMPLOYEE, "Eli Employee"),
        User::new("u-stale", "contractor", "Sam Stale"),
    ])
}

fn manager(handler: InMemoryIdentityHandler) -> SessionManager<InMemoryIdentityHandler> {
    SessionManager::new(handler, Arc::new(RoleStore::builtin()))
}

#[tokio::test]
async fn load_session_resolves_user_and_role() {
    let manager = manager(directory().signed_in_as("u-hr"));
    assert_eq!(manager.phase(), SessionPhase::Uninitialized);

    manager.load_session().await;

    assert_eq!(manager.phase(), SessionPhase::Ready);
    assert!(!manager.is_loading());
    assert!(manager.is_authenticated());
    assert!(manager.has_role(&RoleId::new(role_ids::HR_MANAGER)));
    assert!(manager.has_permission(&PAYROLL_VIEW));
    assert!(!manager.has_permission(&ROLES_MANAGE));
    assert_eq!(manager.snapshot().to_string(), "u-hr@hr_manager");
}

#[tokio::test]
async fn load_session_without_identity_is_anonymous() {
    let manager = manager(directory());
    manager.load_session().await;

    assert_eq!(manager.phase(), SessionPhase::Ready);
    assert!(!manager.is_authenticated());
    assert!(!manager.has_permission(&EMPLOYEES_VIEW));
    assert!(manager.last_failure().is_none());
}

#[tokio::test]
async fn resolution_failure_is_absorbed() {
    let handler = directory().signed_in_as("u-admin");
    let manager = manager(handler.clone());
    manager.load_session().await;
    assert!(manager.has_permission(&USERS_MANAGE));

    handler.fail_next(IdentityError::Unavailable {
        reason: "connection reset".into(),
    });
    manager.refresh_session().await;

    assert!(!manager.is_authenticated());
    assert!(manager.current_role().is_none());
    assert!(!manager.has_permission(&USERS_MANAGE));
    assert!(manager
        .last_failure()
        .is_some_and(|msg| msg.contains("connection reset")));
    assert_eq!(manager.phase(), SessionPhase::Ready);

    manager.refresh_session().await;
    assert!(manager.has_permission(&USERS_MANAGE));
    assert!(manager.last_failure().is_none());
}

#[tokio::test]
async fn user_with_unknown_role_has_no_permissions() {
    let manager = manager(directory().signed_in_as("u-stale"));
    manager.load_session().await;

    assert!(manager.is_authenticated());
    assert!(manager.current_role().is_none());
    assert!(!manager.has_permission(&EMPLOYEES_VIEW));
    assert!(manager.has_all_permissions(&[]));
}

#[tokio::test]
async fn set_role_unknown_is_silent_noop() {
    let handler = directory().signed_in_as("u-emp");
    let manager = manager(handler.clone());
    manager.load_session().await;
    let before = manager.snapshot();

    assert!(!manager.set_role(&RoleId::new("superuser")));

    assert_eq!(manager.snapshot(), before);
    assert_eq!(handler.role_override(), None);
}

#[tokio::test]
async fn set_role_replaces_role_but_not_user() {
    let handler = directory().signed_in_as("u-emp");
    let manager = manager(handler.clone());
    manager.load_session().await;
    assert!(!manager.has_permission(&EMPLOYEES_CREATE));

    assert!(manager.set_role(&RoleId::new(role_ids::ADMIN)));

    assert!(manager.has_permission(&EMPLOYEES_CREATE));
    assert_eq!(
        manager.current_user().map(|u| u.id),
        Some(UserId::new("u-emp"))
    );
    assert_eq!(handler.role_override(), Some(RoleId::new(role_ids::ADMIN)));

    // the provider reports the override, so a refresh keeps it
    manager.refresh_session().await;
    assert!(manager.has_role(&RoleId::new(role_ids::ADMIN)));
}

#[tokio::test]
async fn set_role_after_failed_load_is_ignored() {
    let handler = directory().signed_in_as("u-emp");
    let manager = manager(handler.clone());
    handler.fail_next(IdentityError::Unavailable {
        reason: "connection reset".into(),
    });
    manager.load_session().await;
    assert!(!manager.is_authenticated());

    assert!(!manager.set_role(&RoleId::new(role_ids::ADMIN)));

    assert!(manager.current_role().is_none());
    assert!(!manager.has_permission(&USERS_MANAGE));
    assert_eq!(handler.role_override(), None);
}

#[tokio::test]
async fn switch_user_refreshes_session() {
    let manager = manager(directory().signed_in_as("u-emp"));
    manager.load_session().await;
    manager.set_role(&RoleId::new(role_ids::ADMIN));

    manager.switch_user(&UserId::new("u-hr")).await;

    assert_eq!(
        manager.current_user().map(|u| u.display_name),
        Some("Hana HR".to_string())
    );
    assert!(manager.has_role(&RoleId::new(role_ids::HR_MANAGER)));
}

#[tokio::test]
async fn switch_to_unknown_user_keeps_session() {
    let manager = manager(directory().signed_in_as("u-emp"));
    manager.load_session().await;
    let before = manager.snapshot();

    manager.switch_user(&UserId::new("ghost")).await;

    assert_eq!(manager.snapshot(), before);
}

#[tokio::test]
async fn logout_clears_session_even_if_provider_fails() {
    let handler = directory().signed_in_as("u-admin");
    let manager = manager(handler.clone());
    manager.load_session().await;

    handler.fail_next(IdentityError::Unavailable {
        reason: "timeout".into(),
    });
    manager.logout().await;

    assert!(!manager.is_authenticated());
    assert!(manager.current_role().is_none());
    assert_eq!(manager.phase(), SessionPhase::Uninitialized);
    assert_eq!(handler.current_user_id(), None);
}

#[tokio::test]
async fn guard_follows_session_changes() {
    let manager = manager(directory().signed_in_as("u-emp"));
    let guard = Guard::new(Requirement::any_of([EMPLOYEES_CREATE, USERS_MANAGE]));

    manager.load_session().await;
    assert_eq!(guard.render(&manager, "toolbar", "nothing"), "nothing");

    manager.set_role(&RoleId::new(role_ids::ADMIN));
    assert_eq!(guard.render(&manager, "toolbar", "nothing"), "toolbar");
}

/// Identity provider whose `auth_state` calls resolve only when released.
#[derive(Default)]
struct GatedIdentity {
    gates: Mutex<VecDeque<oneshot::Receiver<AuthState>>>,
}

impl GatedIdentity {
    fn gate(&self) -> oneshot::Sender<AuthState> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait]
impl IdentityEffects for GatedIdentity {
    async fn auth_state(&self) -> Result<AuthState, IdentityError> {
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(rx) => rx.await.map_err(|_| IdentityError::Unavailable {
                reason: "gate dropped".into(),
            }),
            None => Ok(AuthState::anonymous()),
        }
    }

    fn override_role(&self, _role_id: &RoleId) {}

    fn set_current_user(&self, _user_id: &UserId) -> Result<(), IdentityError> {
        Ok(())
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        Ok(())
    }
}

fn auth(id: &str, role: &str) -> AuthState {
    AuthState::for_user(User::new(id, role, id))
}

async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn queries_see_previous_state_while_loading() {
    let identity = Arc::new(GatedIdentity::default());
    let manager = SessionManager::new(identity.clone(), Arc::new(RoleStore::builtin()));

    let first = identity.gate();
    first.send(auth("u-emp", role_ids::EMPLOYEE)).unwrap();
    manager.load_session().await;

    let release = identity.gate();
    let observe = async {
        settle().await;
        assert!(manager.is_loading());
        assert_eq!(manager.phase(), SessionPhase::Loading);
        // still the employee until the refresh completes
        assert!(manager.has_role(&RoleId::new(role_ids::EMPLOYEE)));
        assert!(!manager.has_permission(&ROLES_MANAGE));
        release.send(auth("u-admin", role_ids::ADMIN)).unwrap();
    };
    tokio::join!(manager.refresh_session(), observe);

    assert!(!manager.is_loading());
    assert!(manager.has_permission(&ROLES_MANAGE));
}

#[tokio::test]
async fn overlapping_refreshes_last_resolution_wins() {
    let identity = Arc::new(GatedIdentity::default());
    let manager = SessionManager::new(identity.clone(), Arc::new(RoleStore::builtin()));

    let older = identity.gate();
    let newer = identity.gate();
    let driver = async {
        settle().await;
        newer.send(auth("u-hr", role_ids::HR_MANAGER)).unwrap();
        settle().await;
        // the newer refresh has completed, the older one is still in flight
        assert!(manager.has_role(&RoleId::new(role_ids::HR_MANAGER)));
        assert!(manager.is_loading());
        older.send(auth("u-emp", role_ids::EMPLOYEE)).unwrap();
    };
    tokio::join!(manager.refresh_session(), manager.refresh_session(), driver);

    // the stale refresh resolved last and overwrote the newer result
    assert!(manager.has_role(&RoleId::new(role_ids::EMPLOYEE)));
    assert!(!manager.is_loading());
    assert_eq!(manager.phase(), SessionPhase::Ready);
}

#[tokio::test]
async fn logout_during_refresh_keeps_phase_consistent() {
    let identity = Arc::new(GatedIdentity::default());
    let manager = SessionManager::new(identity.clone(), Arc::new(RoleStore::builtin()));

    identity.gate().send(auth("u-hr", role_ids::HR_MANAGER)).unwrap();
    manager.load_session().await;

    let pending = identity.gate();
    let driver = async {
        settle().await;
        manager.logout().await;
        assert!(!manager.is_authenticated());
        assert!(manager.is_loading());
        assert_eq!(manager.phase(), SessionPhase::Loading);
        pending.send(auth("u-emp", role_ids::EMPLOYEE)).unwrap();
    };
    tokio::join!(manager.refresh_session(), driver);

    // the stale refresh is applied once it resolves
    assert!(!manager.is_loading());
    assert_eq!(manager.phase(), SessionPhase::Ready);
    assert!(manager.has_role(&RoleId::new(role_ids::EMPLOYEE)));
}
