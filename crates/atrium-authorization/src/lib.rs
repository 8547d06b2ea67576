//! # Atrium Authorization - Layer 2: Roles, Sessions, Guards
//!
//! Role-to-permission membership and the session that selects a role:
//!
//! ```text
//! RoleStore → SessionManager → { Guard, navigation filter }
//! ```
//!
//! - [`RoleStore`]: immutable role records and the single membership test
//! - [`SessionManager`]: owns the current identity/role, absorbs resolution
//!   failures, and answers [`PermissionQuery`] calls
//! - [`Guard`]: conditional-render decision over a [`Requirement`]

#![forbid(unsafe_code)]
#![deny(clippy::await_holding_lock)]

pub mod catalog;
pub mod guard;
pub mod manager;
pub mod session;
pub mod store;

pub use atrium_core::PermissionQuery;
pub use catalog::builtin_roles;
pub use guard::{Guard, Requirement, Visibility};
pub use manager::SessionManager;
pub use session::{Session, SessionPhase};
pub use store::RoleStore;
