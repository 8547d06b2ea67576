//! Built-in HR portal sidebar.

use crate::model::{NavGroup, NavItem, NavSubItem, NavigationTree};
use atrium_core::permissions::*;

/// The default sidebar, annotated with the tokens of the built-in catalog.
///
/// The Payroll item carries its own `payroll.manage` token; as with every
/// item-level token it has no effect on filtering.
pub fn default_navigation() -> NavigationTree {
    NavigationTree::new([
        NavGroup::new(
            "Overview",
            [
                NavItem::new(
                    "Dashboard",
                    [
                        NavSubItem::new("Home", "/dashboard").requires(DASHBOARD_VIEW),
                        NavSubItem::new("Reports", "/reports").requires(REPORTS_VIEW),
                    ],
                )
                .with_icon("layout-dashboard"),
                NavItem::new("Help", [NavSubItem::new("Help Center", "/help")])
                    .with_icon("life-buoy"),
            ],
        ),
        NavGroup::new(
            "Workforce",
            [
                NavItem::new(
                    "Employees",
                    [
                        NavSubItem::new("All Employees", "/employees").requires(EMPLOYEES_VIEW),
                        NavSubItem::new("Add Employee", "/employees/new")
                            .requires(EMPLOYEES_CREATE),
                    ],
                )
                .with_icon("users")
                .requires(EMPLOYEES_VIEW),
                NavItem::new(
                    "Departments",
                    [NavSubItem::new("Departments", "/departments").requires(DEPARTMENTS_VIEW)],
                )
                .with_icon("building"),
                NavItem::new(
                    "Recruitment",
                    [
                        NavSubItem::new("Job Openings", "/recruitment").requires(RECRUITMENT_VIEW),
                        NavSubItem::new("Candidates", "/recruitment/candidates")
                            .requires(RECRUITMENT_VIEW),
                    ],
                )
                .with_icon("briefcase"),
                NavItem::new(
                    "Performance",
                    [
                        NavSubItem::new("Reviews", "/performance").requires(PERFORMANCE_VIEW),
                        NavSubItem::new("Goals", "/performance/goals").requires(PERFORMANCE_MANAGE),
                    ],
                )
                .with_icon("trending-up"),
            ],
        ),
        NavGroup::new(
            "Time & Pay",
            [
                NavItem::new(
                    "Attendance",
                    [
                        NavSubItem::new("Timesheets", "/attendance").requires(ATTENDANCE_VIEW),
                        NavSubItem::new("Shifts", "/attendance/shifts").requires(ATTENDANCE_MANAGE),
                    ],
                )
                .with_icon("clock"),
                NavItem::new(
                    "Leave",
                    [
                        NavSubItem::new("My Leave", "/leave").requires(LEAVE_VIEW),
                        NavSubItem::new("Request Leave", "/leave/request").requires(LEAVE_REQUEST),
                        NavSubItem::new("Approvals", "/leave/approvals").requires(LEAVE_APPROVE),
                    ],
                )
                .with_icon("calendar"),
                NavItem::new(
                    "Payroll",
                    [
                        NavSubItem::new("Payslips", "/payroll").requires(PAYROLL_VIEW),
                        NavSubItem::new("Run Payroll", "/payroll/run").requires(PAYROLL_MANAGE),
                    ],
                )
                .with_icon("wallet")
                .requires(PAYROLL_MANAGE),
            ],
        ),
        NavGroup::new(
            "Administration",
            [NavItem::new(
                "Settings",
                [
                    NavSubItem::new("General", "/settings").requires(SETTINGS_VIEW),
                    NavSubItem::new("Roles", "/settings/roles").requires(ROLES_MANAGE),
                    NavSubItem::new("Users", "/settings/users").requires(USERS_MANAGE),
                ],
            )
            .with_icon("settings")],
        ),
    ])
}
