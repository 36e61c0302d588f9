//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers are thin: they parse the caller identity and request data,
//! delegate to a driving port held in [`state::HttpState`], and serialise
//! the result.

use actix_web::web;

pub mod bookings;
pub mod error;
pub mod health;
pub mod identity;
pub mod items;
pub mod requests;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register extractor configs and every API handler.
///
/// Literal segments (`/items/search`, `/bookings/owner`, `/requests/all`) are
/// registered ahead of the `{id}` routes they would otherwise collide with.
pub fn configure(cfg: &mut web::ServiceConfig) {
    validation::configure_extractors(cfg);
    cfg.service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(items::create_item)
        .service(items::list_owner_items)
        .service(items::search_items)
        .service(items::get_item)
        .service(items::update_item)
        .service(items::add_comment)
        .service(bookings::create_booking)
        .service(bookings::list_booker_bookings)
        .service(bookings::list_owner_bookings)
        .service(bookings::get_booking)
        .service(bookings::decide_booking)
        .service(requests::create_request)
        .service(requests::list_own_requests)
        .service(requests::list_other_requests)
        .service(requests::get_request);
}
