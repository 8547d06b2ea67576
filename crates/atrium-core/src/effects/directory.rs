//! User directory effects.
//!
//! Plain CRUD over user records. Nothing here interprets permissions.

use crate::errors::AtriumError;
use crate::identity::{User, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error type for user directory operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum DirectoryError {
    #[error("User not found: {user_id}")]
    NotFound { user_id: UserId },
    #[error("User already exists: {user_id}")]
    AlreadyExists { user_id: UserId },
    #[error("Directory unavailable: {reason}")]
    Unavailable { reason: String },
}

impl From<DirectoryError> for AtriumError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound { user_id } => {
                AtriumError::not_found(format!("user '{user_id}'"))
            }
            DirectoryError::AlreadyExists { user_id } => {
                AtriumError::invalid(format!("user '{user_id}' already exists"))
            }
            DirectoryError::Unavailable { reason } => AtriumError::identity(reason),
        }
    }
}

/// User record CRUD.
#[async_trait]
pub trait UserDirectoryEffects: Send + Sync {
    /// All users, in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, DirectoryError>;

    /// A single user by id.
    async fn get_user(&self, user_id: &UserId) -> Result<User, DirectoryError>;

    /// Insert a new user. Fails if the id is taken.
    async fn create_user(&self, user: User) -> Result<User, DirectoryError>;

    /// Replace an existing user record.
    async fn update_user(&self, user: User) -> Result<User, DirectoryError>;

    /// Remove a user, returning the removed record.
    async fn delete_user(&self, user_id: &UserId) -> Result<User, DirectoryError>;
}
