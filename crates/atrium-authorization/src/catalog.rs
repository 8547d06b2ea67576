//! Built-in role catalog for the HR portal.

use atrium_core::permissions::*;
use atrium_core::Role;

/// Role ids of the built-in catalog.
pub mod role_ids {
    /// Full access
    pub const ADMIN: &str = "admin";
    /// HR department staff
    pub const HR_MANAGER: &str = "hr_manager";
    /// Line manager of a department
    pub const DEPARTMENT_MANAGER: &str = "department_manager";
    /// Regular employee self-service
    pub const EMPLOYEE: &str = "employee";
}

/// The four built-in roles, most to least privileged.
pub fn builtin_roles() -> Vec<Role> {
    vec![
        Role::new(
            role_ids::ADMIN,
            "Administrator",
            "Full access to every module and to system administration",
            ALL.iter().cloned(),
        ),
        Role::new(
            role_ids::HR_MANAGER,
            "HR Manager",
            "Manages employee records, time off, payroll and recruitment",
            [
                DASHBOARD_VIEW,
                EMPLOYEES_VIEW,
                EMPLOYEES_CREATE,
                EMPLOYEES_EDIT,
                EMPLOYEES_DELETE,
                DEPARTMENTS_VIEW,
                DEPARTMENTS_MANAGE,
                ATTENDANCE_VIEW,
                ATTENDANCE_MANAGE,
                LEAVE_VIEW,
                LEAVE_REQUEST,
                LEAVE_APPROVE,
                PAYROLL_VIEW,
                PAYROLL_MANAGE,
                PERFORMANCE_VIEW,
                PERFORMANCE_MANAGE,
                RECRUITMENT_VIEW,
                RECRUITMENT_MANAGE,
                REPORTS_VIEW,
                SETTINGS_VIEW,
            ],
        ),
        Role::new(
            role_ids::DEPARTMENT_MANAGER,
            "Department Manager",
            "Oversees a department's people, attendance and leave",
            [
                DASHBOARD_VIEW,
                EMPLOYEES_VIEW,
                DEPARTMENTS_VIEW,
                ATTENDANCE_VIEW,
                LEAVE_VIEW,
                LEAVE_REQUEST,
                LEAVE_APPROVE,
                PERFORMANCE_VIEW,
                PERFORMANCE_MANAGE,
                REPORTS_VIEW,
            ],
        ),
        Role::new(
            role_ids::EMPLOYEE,
            "Employee",
            "Self-service access to own attendance, leave and reviews",
            [
                DASHBOARD_VIEW,
                ATTENDANCE_VIEW,
                LEAVE_VIEW,
                LEAVE_REQUEST,
                PERFORMANCE_VIEW,
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_a_privilege_chain() {
        let roles = builtin_roles();
        // department manager ⊆ hr manager ⊆ admin, employee ⊆ department manager
        assert!(roles[1].is_subset_of(&roles[0]));
        assert!(roles[2].is_subset_of(&roles[1]));
        assert!(roles[3].is_subset_of(&roles[2]));
    }

    #[test]
    fn test_only_admin_manages_roles() {
        let roles = builtin_roles();
        let holders: Vec<_> = roles
            .iter()
            .filter(|r| r.grants(&ROLES_MANAGE))
            .map(|r| r.id().as_str())
            .collect();
        assert_eq!(holders, [role_ids::ADMIN]);
    }
}
