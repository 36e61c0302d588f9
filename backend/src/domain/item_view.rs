//! Item aggregation.
//!
//! Merges an item with its booking context and comments. Owners see the last
//! and next booking; everyone else gets the item and comments only.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;

use super::ports::{BookingRepository, CommentRepository};
use super::store_errors::{map_booking_error, map_comment_error};
use super::{AuthoredComment, BookingRef, Error, Item, UserId};

/// Display view of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub item: Item,
    /// Latest booking that started before now. Owner only.
    pub last_booking: Option<BookingRef>,
    /// Earliest approved booking starting after now. Owner only.
    pub next_booking: Option<BookingRef>,
    /// Oldest first.
    pub comments: Vec<AuthoredComment>,
}

/// Builds [`ItemView`]s from the booking and comment stores.
pub struct ItemAggregator<B: ?Sized, C: ?Sized> {
    bookings: Arc<B>,
    comments: Arc<C>,
}

impl<B: ?Sized, C: ?Sized> Clone for ItemAggregator<B, C> {
    fn clone(&self) -> Self {
        Self {
            bookings: Arc::clone(&self.bookings),
            comments: Arc::clone(&self.comments),
        }
    }
}

impl<B, C> ItemAggregator<B, C>
where
    B: BookingRepository + ?Sized,
    C: CommentRepository + ?Sized,
{
    pub fn new(bookings: Arc<B>, comments: Arc<C>) -> Self {
        Self { bookings, comments }
    }

    /// Aggregate a single item for `viewer_id`.
    pub async fn aggregate(
        &self,
        item: Item,
        viewer_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<ItemView, Error> {
        let (last_booking, next_booking) = if item.is_owned_by(viewer_id) {
            let (last, next) = futures_util::try_join!(
                async {
                    self.bookings
                        .find_last(item.id(), now)
                        .await
                        .map_err(map_booking_error)
                },
                async {
                    self.bookings
                        .find_next(item.id(), now)
                        .await
                        .map_err(map_booking_error)
                },
            )?;
            (last.as_ref().map(BookingRef::from), next.as_ref().map(BookingRef::from))
        } else {
            (None, None)
        };

        let comments = self
            .comments
            .list_by_item(item.id())
            .await
            .map_err(map_comment_error)?;

        Ok(ItemView {
            item,
            last_booking,
            next_booking,
            comments,
        })
    }

    /// Aggregate several items, preserving their order.
    pub async fn aggregate_all(
        &self,
        items: Vec<Item>,
        viewer_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<ItemView>, Error> {
        try_join_all(
            items
                .into_iter()
                .map(|item| self.aggregate(item, viewer_id, now)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{MockBookingRepository, MockCommentRepository};
    use crate::domain::{
        Booking, BookingId, BookingStatus, BookingWindow, Comment, CommentId, ItemDraft, ItemId,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn item() -> Item {
        Item::try_new(
            ItemId::generate(),
            UserId::generate(),
            ItemDraft {
                name: "Kayak".to_owned(),
                description: "Single seat kayak".to_owned(),
                available: true,
                request_id: None,
            },
        )
        .expect("valid item")
    }

    fn booking(item: &Item, start_h: i64) -> Booking {
        let start = now() + Duration::hours(start_h);
        Booking::new(
            BookingId::generate(),
            *item.id(),
            UserId::generate(),
            BookingWindow::new(start, start + Duration::hours(2)).expect("valid window"),
            BookingStatus::Approved,
        )
    }

    fn comment(item: &Item) -> AuthoredComment {
        AuthoredComment {
            comment: Comment::try_new(
                CommentId::generate(),
                *item.id(),
                UserId::generate(),
                "Great kayak",
                now(),
            )
            .expect("valid comment"),
            author_name: "Grace".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn owner_sees_last_and_next_booking(item: Item) {
        let last = booking(&item, -5);
        let next = booking(&item, 5);
        let expected_last = BookingRef::from(&last);
        let expected_next = BookingRef::from(&next);

        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_last()
            .withf(|_, at| *at == now())
            .times(1)
            .return_once(move |_, _| Ok(Some(last)));
        bookings
            .expect_find_next()
            .times(1)
            .return_once(move |_, _| Ok(Some(next)));
        let mut comments = MockCommentRepository::new();
        let remark = comment(&item);
        let expected_comments = vec![remark.clone()];
        comments
            .expect_list_by_item()
            .times(1)
            .return_once(move |_| Ok(vec![remark]));

        let aggregator = ItemAggregator::new(Arc::new(bookings), Arc::new(comments));
        let owner = *item.owner_id();
        let view = aggregator
            .aggregate(item, &owner, now())
            .await
            .expect("aggregated view");

        assert_eq!(view.last_booking, Some(expected_last));
        assert_eq!(view.next_booking, Some(expected_next));
        assert_eq!(view.comments, expected_comments);
    }

    #[rstest]
    #[tokio::test]
    async fn other_viewers_get_no_booking_context(item: Item) {
        let mut bookings = MockBookingRepository::new();
        bookings.expect_find_last().times(0);
        bookings.expect_find_next().times(0);
        let mut comments = MockCommentRepository::new();
        comments
            .expect_list_by_item()
            .times(1)
            .return_once(|_| Ok(Vec::new()));

        let aggregator = ItemAggregator::new(Arc::new(bookings), Arc::new(comments));
        let view = aggregator
            .aggregate(item.clone(), &UserId::generate(), now())
            .await
            .expect("aggregated view");

        assert_eq!(view.item, item);
        assert!(view.last_booking.is_none());
        assert!(view.next_booking.is_none());
        assert!(view.comments.is_empty());
    }
}
