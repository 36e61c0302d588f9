//! Tests for the in-memory entity store.

use chrono::Duration;
use pagination::PageRequest;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{BookingWindow, CommentId, ItemDraft};
use crate::test_support::reference_instant;

fn user(name: &str) -> User {
    User::try_new(UserId::generate(), name, format!("{name}@example.com")).expect("user")
}

fn item(owner: &User, name: &str, available: bool) -> Item {
    Item::try_new(
        ItemId::generate(),
        *owner.id(),
        ItemDraft {
            name: name.to_owned(),
            description: format!("A {name} for rent"),
            available,
            request_id: None,
        },
    )
    .expect("item")
}

fn booking(item: &Item, booker: &User, start_h: i64, status: BookingStatus) -> Booking {
    let start = reference_instant() + Duration::hours(start_h);
    Booking::new(
        BookingId::generate(),
        *item.id(),
        *booker.id(),
        BookingWindow::new(start, start + Duration::hours(1)).expect("window"),
        status,
    )
}

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::new()
}

#[rstest]
#[tokio::test]
async fn duplicate_email_is_rejected(store: InMemoryStore) {
    let ada = user("ada");
    UserRepository::save(&store, &ada).await.expect("first save");
    let clone = User::try_new(UserId::generate(), "Other", "ada@example.com").expect("user");

    let err = UserRepository::save(&store, &clone)
        .await
        .expect_err("duplicate email");
    assert_eq!(err, UserPersistenceError::duplicate_email("ada@example.com"));

    UserRepository::save(&store, &ada)
        .await
        .expect("re-saving the same user is fine");
}

#[rstest]
#[tokio::test]
async fn deleting_a_user_cascades(store: InMemoryStore) {
    let owner = user("owner");
    let booker = user("booker");
    let drill = item(&owner, "drill", true);
    let stay = booking(&drill, &booker, 1, BookingStatus::Waiting);
    UserRepository::save(&store, &owner).await.expect("owner");
    UserRepository::save(&store, &booker).await.expect("booker");
    ItemRepository::save(&store, &drill).await.expect("item");
    BookingRepository::save(&store, &stay).await.expect("booking");

    assert!(UserRepository::delete(&store, owner.id()).await.expect("delete"));
    assert!(!UserRepository::delete(&store, owner.id()).await.expect("second delete"));
    assert!(
        ItemRepository::find_by_id(&store, drill.id())
            .await
            .expect("lookup")
            .is_none()
    );
    assert!(
        BookingRepository::find_by_id(&store, stay.id())
            .await
            .expect("lookup")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn status_update_is_compare_and_set(store: InMemoryStore) {
    let owner = user("owner");
    let booker = user("booker");
    let drill = item(&owner, "drill", true);
    let stay = booking(&drill, &booker, 1, BookingStatus::Waiting);
    BookingRepository::save(&store, &stay).await.expect("booking");

    let first = store
        .update_status(stay.id(), BookingStatus::Waiting, BookingStatus::Approved)
        .await
        .expect("first decision");
    let second = store
        .update_status(stay.id(), BookingStatus::Waiting, BookingStatus::Approved)
        .await
        .expect("second decision");
    assert!(first);
    assert!(!second);
}

#[rstest]
#[tokio::test]
async fn last_and_next_bookings(store: InMemoryStore) {
    let owner = user("owner");
    let booker = user("booker");
    let drill = item(&owner, "drill", true);
    let older = booking(&drill, &booker, -10, BookingStatus::Approved);
    let latest = booking(&drill, &booker, -2, BookingStatus::Rejected);
    let soon_waiting = booking(&drill, &booker, 2, BookingStatus::Waiting);
    let soon_approved = booking(&drill, &booker, 5, BookingStatus::Approved);
    let later_approved = booking(&drill, &booker, 9, BookingStatus::Approved);
    for b in [&older, &latest, &soon_waiting, &soon_approved, &later_approved] {
        BookingRepository::save(&store, b).await.expect("booking");
    }

    let last = store
        .find_last(drill.id(), reference_instant())
        .await
        .expect("last");
    let next = store
        .find_next(drill.id(), reference_instant())
        .await
        .expect("next");
    assert_eq!(last.as_ref().map(Booking::id), Some(latest.id()));
    assert_eq!(next.as_ref().map(Booking::id), Some(soon_approved.id()));
}

#[rstest]
#[tokio::test]
async fn search_skips_unavailable_items(store: InMemoryStore) {
    let owner = user("owner");
    let open = item(&owner, "Drill", true);
    let closed = item(&owner, "drill press", false);
    ItemRepository::save(&store, &open).await.expect("open");
    ItemRepository::save(&store, &closed).await.expect("closed");

    let found = store
        .search_available("DRILL", PageRequest::default())
        .await
        .expect("search");
    assert_eq!(found, vec![open]);
}

#[rstest]
#[tokio::test]
async fn comments_come_back_oldest_first_with_author_names(store: InMemoryStore) {
    let owner = user("owner");
    let booker = user("booker");
    let drill = item(&owner, "drill", true);
    UserRepository::save(&store, &booker).await.expect("booker");
    let later = Comment::try_new(
        CommentId::generate(),
        *drill.id(),
        *booker.id(),
        "second",
        reference_instant(),
    )
    .expect("comment");
    let earlier = Comment::try_new(
        CommentId::generate(),
        *drill.id(),
        *booker.id(),
        "first",
        reference_instant() - Duration::hours(1),
    )
    .expect("comment");
    CommentRepository::save(&store, &later).await.expect("later");
    CommentRepository::save(&store, &earlier).await.expect("earlier");

    let found = store.list_by_item(drill.id()).await.expect("comments");
    let texts: Vec<&str> = found.iter().map(|c| c.comment.text()).collect();
    assert_eq!(texts, vec!["first", "second"]);
    assert!(found.iter().all(|c| c.author_name == "booker"));
}

#[rstest]
#[tokio::test]
async fn other_users_requests_are_newest_first_and_paged(store: InMemoryStore) {
    let me = user("me");
    let them = user("them");
    let mine = ItemRequest::try_new(ItemRequestId::generate(), *me.id(), "mine", reference_instant())
        .expect("request");
    let mut theirs = Vec::new();
    for hours in 0..3 {
        let request = ItemRequest::try_new(
            ItemRequestId::generate(),
            *them.id(),
            format!("theirs {hours}"),
            reference_instant() + Duration::hours(hours),
        )
        .expect("request");
        ItemRequestRepository::save(&store, &request).await.expect("save");
        theirs.push(request);
    }
    ItemRequestRepository::save(&store, &mine).await.expect("save");

    let page = PageRequest::try_new(1, 5).expect("page");
    let found = store
        .list_excluding_requester(me.id(), page)
        .await
        .expect("list");
    let descriptions: Vec<&str> = found.iter().map(ItemRequest::description).collect();
    assert_eq!(descriptions, vec!["theirs 1", "theirs 0"]);
}

#[rstest]
#[tokio::test]
async fn requests_created_together_are_ordered_by_id(store: InMemoryStore) {
    let me = user("me");
    let first = ItemRequest::try_new(ItemRequestId::generate(), *me.id(), "first", reference_instant())
        .expect("request");
    let second =
        ItemRequest::try_new(ItemRequestId::generate(), *me.id(), "second", reference_instant())
            .expect("request");
    ItemRequestRepository::save(&store, &second).await.expect("save");
    ItemRequestRepository::save(&store, &first).await.expect("save");

    let found = store.list_by_requester(me.id()).await.expect("list");
    let descriptions: Vec<&str> = found.iter().map(ItemRequest::description).collect();
    assert_eq!(descriptions, vec!["first", "second"]);
}

#[rstest]
#[tokio::test]
async fn owner_items_come_back_in_creation_order(store: InMemoryStore) {
    let owner = user("owner");
    let created: Vec<Item> = ["alpha", "bravo", "charlie", "delta"]
        .into_iter()
        .map(|name| item(&owner, name, true))
        .collect();
    for it in created.iter().rev() {
        ItemRepository::save(&store, it).await.expect("save");
    }

    let found = store
        .list_by_owner(owner.id(), PageRequest::default())
        .await
        .expect("list");
    let names: Vec<&str> = found.iter().map(Item::name).collect();
    assert_eq!(names, vec!["alpha", "bravo", "charlie", "delta"]);
}
