//! Shared validation helpers for inbound HTTP adapters.
//!
//! Actix extractor failures (malformed JSON, non-numeric path ids, bad query
//! strings) are routed through [`configure`] so they surface as the same
//! `invalid_request` envelope the domain produces.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use pagination::{DEFAULT_PAGE_SIZE, PageRequest};

use crate::domain::{Error, FieldError};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: FieldName, message: impl Into<String>) -> Error {
    Error::validation(vec![FieldError::new(field.as_str(), message)])
}

/// Build a [`PageRequest`] from optional wire values, reporting bad sizes
/// against the `size` field.
pub(crate) fn parse_page_request(page: Option<u32>, size: Option<u32>) -> Result<PageRequest, Error> {
    PageRequest::new(page.unwrap_or(0), size.unwrap_or(DEFAULT_PAGE_SIZE))
        .map_err(|err| field_error(FieldName::new("size"), err.to_string()))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("malformed request body: {err}")).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid path parameter: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}")).into()
}

/// Register extractor configurations that report failures as domain errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));
}
