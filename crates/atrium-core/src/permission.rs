//! Permission tokens
//!
//! A [`PermissionToken`] is an opaque `resource.action` string. Tokens compare
//! by exact string equality: there are no wildcards and no hierarchy, so
//! `employees.view` and `employees.*` are unrelated tokens (the latter is not
//! even well-formed).
//!
//! Well-known tokens live in [`permissions`] as compile-time constants so
//! call sites that name a fixed capability cannot misspell it.

use crate::errors::AtriumError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Opaque capability identifier, namespaced as `resource.action`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionToken(Cow<'static, str>);

impl PermissionToken {
    /// Build a token from a static string without validation.
    ///
    /// Intended for constants; the literal must already be `resource.action`.
    pub const fn from_static(token: &'static str) -> Self {
        Self(Cow::Borrowed(token))
    }

    /// Parse and validate a token.
    pub fn parse(token: impl Into<String>) -> Result<Self, AtriumError> {
        let token = token.into();
        validate_token(&token)?;
        Ok(Self(Cow::Owned(token)))
    }

    /// The full token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The resource namespace (`employees` in `employees.view`).
    pub fn resource(&self) -> &str {
        self.0.split_once('.').map_or(&self.0, |(resource, _)| resource)
    }

    /// The action (`view` in `employees.view`).
    pub fn action(&self) -> &str {
        self.0.split_once('.').map_or("", |(_, action)| action)
    }
}

fn validate_token(token: &str) -> Result<(), AtriumError> {
    let Some((resource, action)) = token.split_once('.') else {
        return Err(AtriumError::invalid(format!(
            "permission token '{token}' must have the form resource.action"
        )));
    };
    let part_ok = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    };
    if !part_ok(resource) || !part_ok(action) {
        return Err(AtriumError::invalid(format!(
            "permission token '{token}' has an empty or non-ascii segment"
        )));
    }
    Ok(())
}

impl fmt::Display for PermissionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PermissionToken {
    type Err = AtriumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PermissionToken {
    type Error = AtriumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PermissionToken> for String {
    fn from(token: PermissionToken) -> Self {
        token.0.into_owned()
    }
}

impl AsRef<str> for PermissionToken {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Well-known permission tokens of the HR portal.
#[allow(missing_docs)]
pub mod permissions {
    use super::PermissionToken;

    pub const DASHBOARD_VIEW: PermissionToken = PermissionToken::from_static("dashboard.view");

    pub const EMPLOYEES_VIEW: PermissionToken = PermissionToken::from_static("employees.view");
    pub const EMPLOYEES_CREATE: PermissionToken = PermissionToken::from_static("employees.create");
    pub const EMPLOYEES_EDIT: PermissionToken = PermissionToken::from_static("employees.edit");
    pub const EMPLOYEES_DELETE: PermissionToken = PermissionToken::from_static("employees.delete");

    pub const DEPARTMENTS_VIEW: PermissionToken = PermissionToken::from_static("departments.view");
    pub const DEPARTMENTS_MANAGE: PermissionToken =
        PermissionToken::from_static("departments.manage");

    pub const ATTENDANCE_VIEW: PermissionToken = PermissionToken::from_static("attendance.view");
    pub const ATTENDANCE_MANAGE: PermissionToken =
        PermissionToken::from_static("attendance.manage");

    pub const LEAVE_VIEW: PermissionToken = PermissionToken::from_static("leave.view");
    pub const LEAVE_REQUEST: PermissionToken = PermissionToken::from_static("leave.request");
    pub const LEAVE_APPROVE: PermissionToken = PermissionToken::from_static("leave.approve");

    pub const PAYROLL_VIEW: PermissionToken = PermissionToken::from_static("payroll.view");
    pub const PAYROLL_MANAGE: PermissionToken = PermissionToken::from_static("payroll.manage");

    pub const PERFORMANCE_VIEW: PermissionToken = PermissionToken::from_static("performance.view");
    pub const PERFORMANCE_MANAGE: PermissionToken =
        PermissionToken::from_static("performance.manage");

    pub const RECRUITMENT_VIEW: PermissionToken = PermissionToken::from_static("recruitment.view");
    pub const RECRUITMENT_MANAGE: PermissionToken =
        PermissionToken::from_static("recruitment.manage");

    pub const REPORTS_VIEW: PermissionToken = PermissionToken::from_static("reports.view");

    pub const SETTINGS_VIEW: PermissionToken = PermissionToken::from_static("settings.view");
    pub const SETTINGS_MANAGE: PermissionToken = PermissionToken::from_static("settings.manage");

    pub const ROLES_MANAGE: PermissionToken = PermissionToken::from_static("roles.manage");
    pub const USERS_MANAGE: PermissionToken = PermissionToken::from_static("users.manage");

    /// Every well-known token, in catalog order.
    pub const ALL: &[PermissionToken] = &[
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
        SETTINGS_MANAGE,
        ROLES_MANAGE,
        USERS_MANAGE,
    ];
}
