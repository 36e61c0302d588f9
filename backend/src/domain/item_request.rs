//! "Wanted item" requests.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{Item, ItemRequestId, UserId};

/// Validation errors raised while building an [`ItemRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRequestValidationError {
    BlankDescription,
}

impl fmt::Display for ItemRequestValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankDescription => write!(f, "request description must not be blank"),
        }
    }
}

impl std::error::Error for ItemRequestValidationError {}

/// A user's request for an item nobody offers yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    id: ItemRequestId,
    requester_id: UserId,
    description: String,
    created_at: DateTime<Utc>,
}

impl ItemRequest {
    /// Build a request, rejecting a blank description.
    pub fn try_new(
        id: ItemRequestId,
        requester_id: UserId,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ItemRequestValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ItemRequestValidationError::BlankDescription);
        }
        Ok(Self {
            id,
            requester_id,
            description,
            created_at,
        })
    }

    pub fn id(&self) -> &ItemRequestId {
        &self.id
    }

    pub fn requester_id(&self) -> &UserId {
        &self.requester_id
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A request together with the items offered against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequestView {
    pub request: ItemRequest,
    pub items: Vec<Item>,
}
