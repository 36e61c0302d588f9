//! Domain entities, rules and services.
//!
//! Purpose: hold the business rules of the sharing platform independently of
//! HTTP and storage. Entities validate their own invariants on construction;
//! cross-entity rules live in [`rules`]; booking list resolution lives in
//! [`booking_query`]; services in this module implement the driving ports in
//! [`ports`] over the driven repository ports.

pub mod booking;
pub mod booking_query;
pub mod booking_service;
pub mod comment;
pub mod error;
pub mod ids;
pub mod item;
pub mod item_request;
pub mod item_request_service;
pub mod item_service;
pub mod item_view;
pub mod ports;
pub mod rules;
pub(crate) mod store_errors;
pub mod user;
pub mod user_service;

pub use self::booking::{
    Booking, BookingDraft, BookingRef, BookingState, BookingStatus, BookingValidationError,
    BookingWindow, DecisionPolicy, ParseBookingStatusError, ParseDecisionPolicyError,
    UnknownStateError,
};
pub use self::booking_query::{BookingFilter, BookingQuery, BookingSubject};
pub use self::booking_service::BookingServiceImpl;
pub use self::comment::{AuthoredComment, Comment, CommentValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::ids::{BookingId, CommentId, ItemId, ItemRequestId, UserId};
pub use self::item::{Item, ItemDraft, ItemPatch, ItemValidationError};
pub use self::item_request::{ItemRequest, ItemRequestValidationError, ItemRequestView};
pub use self::item_request_service::ItemRequestServiceImpl;
pub use self::item_service::{ItemServiceImpl, ItemStores};
pub use self::item_view::{ItemAggregator, ItemView};
pub use self::user::{Email, User, UserPatch, UserValidationError};
pub use self::user_service::UserServiceImpl;
