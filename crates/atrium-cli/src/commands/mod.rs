//! Subcommand implementations.

pub mod check;
pub mod nav;
pub mod roles;
pub mod session;
