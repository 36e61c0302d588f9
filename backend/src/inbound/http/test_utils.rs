//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};

use crate::domain::UserId;
use crate::domain::ports::{
    MockBookingService, MockItemRequestService, MockItemService, MockUserService,
};
use crate::inbound::http::identity::SHARER_USER_ID_HEADER;
use crate::inbound::http::state::HttpState;

/// Driving-port mocks; set expectations on the field a test exercises and
/// leave the rest untouched.
#[derive(Default)]
pub struct MockPorts {
    pub users: MockUserService,
    pub items: MockItemService,
    pub bookings: MockBookingService,
    pub requests: MockItemRequestService,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.users),
            Arc::new(self.items),
            Arc::new(self.bookings),
            Arc::new(self.requests),
        )
    }
}

/// Application with every API route mounted over the given state.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(super::configure)
}

/// Header tuple identifying `user` as the caller.
pub fn sharer(user: &UserId) -> (&'static str, String) {
    (SHARER_USER_ID_HEADER, user.to_string())
}
