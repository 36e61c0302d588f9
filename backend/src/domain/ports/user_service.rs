//! Driving port for user management.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, UserPatch};

/// Signup payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// User management use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a user with a unique email.
    async fn create_user(&self, new_user: NewUser) -> Result<User, Error>;

    /// Apply a partial update.
    async fn update_user(&self, id: &UserId, patch: UserPatch) -> Result<User, Error>;

    /// Fetch one user.
    async fn get_user(&self, id: &UserId) -> Result<User, Error>;

    /// List every user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Delete a user.
    async fn delete_user(&self, id: &UserId) -> Result<(), Error>;
}
