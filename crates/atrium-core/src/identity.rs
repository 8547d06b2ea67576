//! Identity types
//!
//! A [`User`] references exactly one role by [`RoleId`] at any moment. The
//! identity provider owns these records; the engine only reads them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a role record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    /// Create a role identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a user record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a user identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Employment status of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Working normally
    #[default]
    Active,
    /// Temporarily away
    OnLeave,
    /// No longer active in the organisation
    Inactive,
}

impl UserStatus {
    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "on leave",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An identity as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,
    /// The single role this user holds
    pub role_id: RoleId,
    /// Name shown in the UI
    pub display_name: String,
    /// Employment status
    #[serde(default)]
    pub status: UserStatus,
    /// Department name, if assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Contact address, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    /// Create an active user with no department or email.
    pub fn new(
        id: impl Into<UserId>,
        role_id: impl Into<RoleId>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role_id: role_id.into(),
            display_name: display_name.into(),
            status: UserStatus::Active,
            department: None,
            email: None,
        }
    }

    /// Set the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }
}
