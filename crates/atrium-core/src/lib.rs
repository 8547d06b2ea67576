//! # Atrium Core - Layer 1: Types and Traits
//!
//! Shared vocabulary for the Atrium access-control engine:
//!
//! - [`PermissionToken`]: opaque `resource.action` capability identifier
//! - [`Role`] and [`User`]: immutable role records and the identities that reference them
//! - [`PermissionQuery`]: the query API consumed by guards and the navigation filter
//! - [`effects`]: trait definitions for the external identity and user-directory collaborators
//! - [`AtriumConfig`]: TOML-backed configuration with environment overrides
//!
//! This crate defines **what** the collaborators provide; handlers in
//! `atrium-effects` define **how**.

#![forbid(unsafe_code)]

pub mod config;
pub mod effects;
pub mod errors;
pub mod identity;
pub mod permission;
pub mod query;
pub mod role;

pub use config::{AtriumConfig, RoleDefinition};
pub use errors::{AtriumError, AtriumResult};
pub use identity::{RoleId, User, UserId, UserStatus};
pub use permission::{permissions, PermissionToken};
pub use query::PermissionQuery;
pub use role::Role;
