//! Driving port for instructor mutations.

use async_trait::async_trait;

use crate::domain::{Error, Instructor, InstructorId, InstructorPayload};

/// Driving port for creating, replacing and deleting instructors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstructorCommand: Send + Sync {
    async fn create_instructor(&self, payload: InstructorPayload) -> Result<Instructor, Error>;

    async fn update_instructor(
        &self,
        id: InstructorId,
        payload: InstructorPayload,
    ) -> Result<Instructor, Error>;

    /// Fails with a conflict while any course references the instructor.
    async fn delete_instructor(&self, id: InstructorId) -> Result<(), Error>;
}
