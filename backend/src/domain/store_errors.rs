//! Translation of repository failures into domain errors.
//!
//! Connection failures surface as `service_unavailable`, query failures as
//! `internal_error`. Each is logged at `debug` with the adapter's message
//! before the message reaches the redacting HTTP layer.

use tracing::debug;

use super::Error;
use super::ports::{
    BookingPersistenceError, CommentPersistenceError, ItemPersistenceError,
    ItemRequestPersistenceError, UserPersistenceError,
};

fn unavailable(store: &str, message: &str) -> Error {
    debug!(store, %message, "entity store unreachable");
    Error::service_unavailable(format!("{store} repository unavailable: {message}"))
}

fn failed(store: &str, message: &str) -> Error {
    debug!(store, %message, "entity store query failed");
    Error::internal(format!("{store} repository error: {message}"))
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => unavailable("user", &message),
        UserPersistenceError::Query { message } => failed("user", &message),
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict(format!("email {email} is already registered"))
        }
    }
}

pub(crate) fn map_item_error(error: ItemPersistenceError) -> Error {
    match error {
        ItemPersistenceError::Connection { message } => unavailable("item", &message),
        ItemPersistenceError::Query { message } => failed("item", &message),
    }
}

pub(crate) fn map_booking_error(error: BookingPersistenceError) -> Error {
    match error {
        BookingPersistenceError::Connection { message } => unavailable("booking", &message),
        BookingPersistenceError::Query { message } => failed("booking", &message),
    }
}

pub(crate) fn map_comment_error(error: CommentPersistenceError) -> Error {
    match error {
        CommentPersistenceError::Connection { message } => unavailable("comment", &message),
        CommentPersistenceError::Query { message } => failed("comment", &message),
    }
}

pub(crate) fn map_item_request_error(error: ItemRequestPersistenceError) -> Error {
    match error {
        ItemRequestPersistenceError::Connection { message } => {
            unavailable("item request", &message)
        }
        ItemRequestPersistenceError::Query { message } => failed("item request", &message),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[case(UserPersistenceError::duplicate_email("a@b.io"), ErrorCode::Conflict)]
    fn user_errors_map_to_codes(#[case] error: UserPersistenceError, #[case] code: ErrorCode) {
        assert_eq!(map_user_error(error).code(), code);
    }

    #[rstest]
    fn booking_connection_failure_is_unavailable() {
        let err = map_booking_error(BookingPersistenceError::connection("pool closed"));
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
        assert!(err.message().contains("pool closed"));
    }
}
