//! Item comments.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{CommentId, ItemId, UserId};

/// Validation errors raised while building a [`Comment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    BlankText,
}

impl fmt::Display for CommentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankText => write!(f, "comment text must not be blank"),
        }
    }
}

impl std::error::Error for CommentValidationError {}

/// Feedback left by a past booker on an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    item_id: ItemId,
    author_id: UserId,
    text: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a comment, rejecting blank text.
    pub fn try_new(
        id: CommentId,
        item_id: ItemId,
        author_id: UserId,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CommentValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CommentValidationError::BlankText);
        }
        Ok(Self {
            id,
            item_id,
            author_id,
            text,
            created_at,
        })
    }

    pub fn id(&self) -> &CommentId {
        &self.id
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Comment joined with its author's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredComment {
    pub comment: Comment,
    pub author_name: String,
}
