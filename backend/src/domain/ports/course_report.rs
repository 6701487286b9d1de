//! Driving port for CSV course reports.

use async_trait::async_trait;

use crate::domain::{CourseListRequest, Error};

/// Driving port rendering every course matching a filter as CSV.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseReport: Send + Sync {
    /// CSV bytes, header row first. The request's page index is ignored;
    /// its page size sets how many courses are fetched per round trip.
    async fn generate_report(&self, request: CourseListRequest) -> Result<Vec<u8>, Error>;
}
