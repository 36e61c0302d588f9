//! User management service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{NewUser, UserRepository, UserService};
use super::rules::require_user_exists;
use super::store_errors::map_user_error;
use super::{Error, User, UserId, UserPatch};

/// [`UserService`] backed by a [`UserRepository`].
pub struct UserServiceImpl<R: ?Sized> {
    users: Arc<R>,
}

impl<R: ?Sized> UserServiceImpl<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> UserService for UserServiceImpl<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(&self, new_user: NewUser) -> Result<User, Error> {
        let user = User::try_new(UserId::generate(), new_user.name, new_user.email)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.users.save(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update_user(&self, id: &UserId, patch: UserPatch) -> Result<User, Error> {
        let current = require_user_exists(self.users.as_ref(), id).await?;
        let updated = current
            .patched(&patch)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.users.save(&updated).await.map_err(map_user_error)?;
        info!(user_id = %id, "user updated");
        Ok(updated)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        require_user_exists(self.users.as_ref(), id).await
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list_all().await.map_err(map_user_error)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        let removed = self.users.delete(id).await.map_err(map_user_error)?;
        if !removed {
            return Err(Error::not_found(format!("user {id} not found")));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}
