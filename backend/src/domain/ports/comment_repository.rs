//! Port for item comment persistence.

use async_trait::async_trait;

use crate::domain::{AuthoredComment, Comment, ItemId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
    }
}

/// Store of item comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment.
    async fn save(&self, comment: &Comment) -> Result<(), CommentPersistenceError>;

    /// Comments on an item with author names, oldest first.
    async fn list_by_item(
        &self,
        item_id: &ItemId,
    ) -> Result<Vec<AuthoredComment>, CommentPersistenceError>;
}
