//! Driving port for course mutations.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, CoursePayload, Error};

/// Driving port for creating, replacing and deleting courses.
///
/// Implementations validate fields, enforce code uniqueness and require the
/// referenced instructor to exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    async fn create_course(&self, payload: CoursePayload) -> Result<Course, Error>;

    async fn update_course(&self, id: CourseId, payload: CoursePayload) -> Result<Course, Error>;

    async fn delete_course(&self, id: CourseId) -> Result<(), Error>;
}
