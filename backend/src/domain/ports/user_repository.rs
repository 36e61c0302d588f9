//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds the email address.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

/// Store of registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or replace a user. Fails with `DuplicateEmail` when another
    /// user holds the same address.
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// All users.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Remove a user and everything it owns. Returns `false` when absent.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
