//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{BookingService, ItemRequestService, ItemService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserService>,
    pub items: Arc<dyn ItemService>,
    pub bookings: Arc<dyn BookingService>,
    pub requests: Arc<dyn ItemRequestService>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        users: Arc<dyn UserService>,
        items: Arc<dyn ItemService>,
        bookings: Arc<dyn BookingService>,
        requests: Arc<dyn ItemRequestService>,
    ) -> Self {
        Self {
            users,
            items,
            bookings,
            requests,
        }
    }
}
