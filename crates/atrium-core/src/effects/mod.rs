//! Collaborator effect traits
//!
//! Pure trait definitions for the side effects the engine performs against
//! systems it does not own:
//!
//! - [`IdentityEffects`]: the identity provider that resolves the active user
//!   and accepts session mutations (switch user, role override, logout)
//! - [`UserDirectoryEffects`]: user CRUD with no permission logic
//!
//! Handlers live in `atrium-effects`; the session manager is generic over
//! these traits so tests can drive it deterministically.

pub mod directory;
pub mod identity;

pub use directory::{DirectoryError, UserDirectoryEffects};
pub use identity::{AuthState, IdentityEffects, IdentityError};
