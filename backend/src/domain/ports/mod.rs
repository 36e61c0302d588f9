//! Domain ports: the edges of the hexagon.
//!
//! Driven ports (`*Repository`) describe what the domain needs from the entity
//! store. Driving ports (`*Service`) are the use cases inbound adapters call.
//! Every repository exposes its own error enum so adapters map failures into
//! predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_repository;
mod booking_service;
mod comment_repository;
mod item_repository;
mod item_request_repository;
mod item_request_service;
mod item_service;
mod user_repository;
mod user_service;

#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingPersistenceError, BookingRepository};
#[cfg(test)]
pub use booking_service::MockBookingService;
pub use booking_service::BookingService;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentPersistenceError, CommentRepository};
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemPersistenceError, ItemRepository};
#[cfg(test)]
pub use item_request_repository::MockItemRequestRepository;
pub use item_request_repository::{ItemRequestPersistenceError, ItemRequestRepository};
#[cfg(test)]
pub use item_request_service::MockItemRequestService;
pub use item_request_service::ItemRequestService;
#[cfg(test)]
pub use item_service::MockItemService;
pub use item_service::ItemService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_service::MockUserService;
pub use user_service::{NewUser, UserService};
