//! Strongly typed entity identifiers.
//!
//! Every entity is keyed by a UUID v7 generated when it is created. Version 7
//! identifiers sort by creation time, so `id` ordering is creation order in
//! both stores. Distinct newtypes stop a booking id from being passed where an
//! item id is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh identifier, ordered after every identifier
            /// generated before it in this process.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the inner UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user.
    UserId
);
define_id!(
    /// Identifier of a shareable item.
    ItemId
);
define_id!(
    /// Identifier of a booking.
    BookingId
);
define_id!(
    /// Identifier of a comment left on an item.
    CommentId
);
define_id!(
    /// Identifier of a "wanted item" request.
    ItemRequestId
);

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn generated_ids_differ() {
        assert_ne!(ItemId::generate(), ItemId::generate());
    }

    #[rstest]
    fn generated_ids_sort_in_creation_order() {
        let ids: Vec<ItemId> = (0..64).map(|_| ItemId::generate()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[rstest]
    fn parses_and_serialises_as_bare_uuid() {
        let id: UserId = "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().expect("valid uuid");
        let json = serde_json::to_string(&id).expect("serialise id");
        assert_eq!(json, "\"3fa85f64-5717-4562-b3fc-2c963f66afa6\"");
    }

    #[rstest]
    fn rejects_malformed_text() {
        assert!("not-a-uuid".parse::<BookingId>().is_err());
    }
}
