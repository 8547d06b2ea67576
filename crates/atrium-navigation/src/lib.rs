//! # Atrium Navigation - Layer 2: Sidebar Model
//!
//! The static navigation tree, the permission filter that prunes it for the
//! current session, and the expansion state machine that decides which
//! branches render open.
//!
//! ```text
//! NavigationTree ──filter_navigation(query)──▶ NavigationTree (visible subset)
//!                                                   │
//!                      route ──▶ ExpansionState::reconcile
//!                                                   │
//!                                                   ▼
//!                                            NavigationView
//! ```
//!
//! Permissions arrive through [`atrium_core::PermissionQuery`], so any
//! implementor works: a live session manager, a session snapshot, or a bare
//! role when previewing.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod controller;
pub mod expansion;
pub mod filter;
pub mod model;

pub use catalog::default_navigation;
pub use controller::{GroupView, ItemView, NavigationController, NavigationView, SubItemView};
pub use expansion::ExpansionState;
pub use filter::filter_navigation;
pub use model::{Breadcrumb, NavGroup, NavItem, NavSubItem, NavigationTree};
