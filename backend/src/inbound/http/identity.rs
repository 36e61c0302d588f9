//! Caller identity carried in the `X-Sharer-User-Id` header.
//!
//! The header is trusted: an upstream gateway authenticates the caller and
//! forwards the user identifier. Handlers take [`SharerUserId`] as an
//! extractor and never read the header themselves.

use std::future::{Ready, ready};
use std::str::FromStr;

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use serde_json::json;

use crate::domain::{Error, UserId};

/// Header naming the acting user.
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Identifier of the user on whose behalf the request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerUserId(UserId);

impl SharerUserId {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }

    pub fn into_inner(self) -> UserId {
        self.0
    }
}

fn header_error(message: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "header": SHARER_USER_ID_HEADER,
        "code": code,
    }))
}

fn extract(req: &HttpRequest) -> Result<SharerUserId, Error> {
    let value = req
        .headers()
        .get(SHARER_USER_ID_HEADER)
        .ok_or_else(|| header_error("X-Sharer-User-Id header is required", "missing_header"))?;
    let raw = value
        .to_str()
        .map_err(|_| header_error("X-Sharer-User-Id must be a UUID", "invalid_uuid"))?;
    UserId::from_str(raw.trim())
        .map(SharerUserId)
        .map_err(|_| header_error("X-Sharer-User-Id must be a UUID", "invalid_uuid"))
}

impl FromRequest for SharerUserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
