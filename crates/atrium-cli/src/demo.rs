//! Demo directory for the `session` subcommand.

use atrium_authorization::catalog::role_ids;
use atrium_core::{User, UserStatus};
use atrium_effects::InMemoryIdentityHandler;

/// User the demo session starts as when none is configured.
pub const DEFAULT_USER: &str = "u-004";

/// One user per built-in role.
pub fn demo_users() -> Vec<User> {
    vec![
        User::new("u-001", role_ids::ADMIN, "Alex Morgan")
            .with_department("IT")
            .with_email("alex.morgan@example.com"),
        User::new("u-002", role_ids::HR_MANAGER, "Priya Shah")
            .with_department("Human Resources")
            .with_email("priya.shah@example.com"),
        User::new("u-003", role_ids::DEPARTMENT_MANAGER, "Tomás Rivera")
            .with_department("Engineering")
            .with_email("tomas.rivera@example.com"),
        User::new("u-004", role_ids::EMPLOYEE, "Mei Chen")
            .with_department("Engineering")
            .with_email("mei.chen@example.com"),
        User::new("u-005", role_ids::EMPLOYEE, "Jonas Berg")
            .with_department("Sales")
            .with_status(UserStatus::OnLeave),
    ]
}

/// In-memory provider seeded with [`demo_users`].
pub fn demo_identity() -> InMemoryIdentityHandler {
    InMemoryIdentityHandler::with_users(demo_users())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_authorization::RoleStore;

    #[test]
    fn test_demo_users_hold_builtin_roles() {
        let store = RoleStore::builtin();
        for user in demo_users() {
            assert!(store.find_role(&user.role_id).is_some(), "{}", user.id);
        }
        assert!(demo_users().iter().any(|u| u.id.as_str() == DEFAULT_USER));
    }
}
