//! Shareable item data model.

use std::fmt;

use super::user::non_blank;
use super::{ItemId, ItemRequestId, UserId};

/// Validation errors raised while building an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    BlankName,
    BlankDescription,
}

impl fmt::Display for ItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => write!(f, "item name must not be blank"),
            Self::BlankDescription => write!(f, "item description must not be blank"),
        }
    }
}

impl std::error::Error for ItemValidationError {}

/// Owner-supplied fields of a new item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<ItemRequestId>,
}

/// Partial item update. Absent or blank text keeps the old value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// An item offered for booking.
///
/// ## Invariants
/// - `name` and `description` are non-blank.
/// - `owner_id` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    owner_id: UserId,
    name: String,
    description: String,
    available: bool,
    request_id: Option<ItemRequestId>,
}

impl Item {
    /// Build an item from a draft.
    pub fn try_new(
        id: ItemId,
        owner_id: UserId,
        draft: ItemDraft,
    ) -> Result<Self, ItemValidationError> {
        let ItemDraft {
            name,
            description,
            available,
            request_id,
        } = draft;
        if name.trim().is_empty() {
            return Err(ItemValidationError::BlankName);
        }
        if description.trim().is_empty() {
            return Err(ItemValidationError::BlankDescription);
        }
        Ok(Self {
            id,
            owner_id,
            name,
            description,
            available,
            request_id,
        })
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn request_id(&self) -> Option<&ItemRequestId> {
        self.request_id.as_ref()
    }

    /// Whether `user_id` owns this item.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Return a copy with the patch applied.
    pub fn patched(&self, patch: &ItemPatch) -> Self {
        Self {
            name: non_blank(patch.name.as_deref())
                .map_or_else(|| self.name.clone(), str::to_owned),
            description: non_blank(patch.description.as_deref())
                .map_or_else(|| self.description.clone(), str::to_owned),
            available: patch.available.unwrap_or(self.available),
            ..self.clone()
        }
    }

    /// Copy of this item no longer linked to a request.
    #[must_use]
    pub fn detached_from_request(&self) -> Self {
        Self {
            request_id: None,
            ..self.clone()
        }
    }

    /// Case-insensitive match on name or description.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
