//! # Atrium Effects - Layer 3: Collaborator Handlers
//!
//! Concrete handlers for the effect traits declared in `atrium-core`.
//!
//! The only backend shipped here is in-memory. It stands in for the external
//! identity provider and user directory in tests and in the `atrium` CLI, and
//! supports failure injection and artificial latency so session behaviour
//! under slow or failing providers can be exercised deterministically.

#![forbid(unsafe_code)]
#![deny(clippy::await_holding_lock)]

pub mod memory;

pub use memory::InMemoryIdentityHandler;
