//! Driving port for course reads.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Course, CourseDetail, CourseId, CourseListRequest, Error};

/// Driving port for course lookups and filtered listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// Course with its instructor embedded.
    async fn get_course(&self, id: CourseId) -> Result<CourseDetail, Error>;

    /// One page of courses matching the request's filter.
    async fn list_courses(&self, request: CourseListRequest) -> Result<Page<Course>, Error>;
}
