//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every extractor failure (malformed JSON, bad query string, unparsable path
//! segment) is turned into the domain [`Error`] so clients always receive the
//! same JSON error body.

use actix_web::web;
use pagination::{PageRequest, PageRequestError};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidBody,
    InvalidQuery,
    InvalidPath,
    InvalidPage,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidBody => "invalid_body",
            Self::InvalidQuery => "invalid_query",
            Self::InvalidPath => "invalid_path",
            Self::InvalidPage => "invalid_page",
        }
    }
}

/// Required body field was absent.
pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

fn extractor_error(message: String, code: ErrorCode) -> actix_web::Error {
    Error::invalid_request(message)
        .with_details(json!({ "code": code.as_str() }))
        .into()
}

/// Register JSON, query and path extractor configs that report failures as
/// domain errors.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| extractor_error(err.to_string(), ErrorCode::InvalidBody)),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| extractor_error(err.to_string(), ErrorCode::InvalidQuery)),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| extractor_error(err.to_string(), ErrorCode::InvalidPath)),
    );
}

/// `from`/`size` query parameters shared by list endpoints.
#[derive(Debug, Default, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Absolute offset of the first record. Defaults to 0.
    pub from: Option<i64>,
    /// Maximum records to return. Defaults to 10.
    pub size: Option<i64>,
}

impl PageQuery {
    /// Validate into a [`PageRequest`].
    pub fn to_page(self) -> Result<PageRequest, Error> {
        PageRequest::from_optional(self.from, self.size).map_err(map_page_error)
    }
}

fn map_page_error(err: PageRequestError) -> Error {
    let field = match err {
        PageRequestError::NegativeOffset { .. } => "from",
        PageRequestError::NonPositiveLimit { .. } => "size",
    };
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": ErrorCode::InvalidPage.as_str(),
    }))
}
