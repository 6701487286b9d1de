//! Port for instructor persistence.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Instructor, InstructorDraft, InstructorId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by instructor repository adapters.
    pub enum InstructorRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "instructor repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "instructor repository query failed: {message}",
        /// Another instructor already uses the email address.
        DuplicateEmail { email: String } =>
            "instructor email already exists: {email}",
    }
}

/// Outcome of [`InstructorRepository::delete_unreferenced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructorDeletion {
    Deleted,
    NotFound,
    /// Courses still reference the instructor; nothing was removed.
    Referenced { course_count: u64 },
}

/// Port for reading and writing instructors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstructorRepository: Send + Sync {
    /// Store a new instructor and return it with its generated id.
    async fn insert(
        &self,
        draft: &InstructorDraft,
    ) -> Result<Instructor, InstructorRepositoryError>;

    /// Replace every field of an existing instructor. `None` when absent.
    async fn update(
        &self,
        id: InstructorId,
        draft: &InstructorDraft,
    ) -> Result<Option<Instructor>, InstructorRepositoryError>;

    async fn find_by_id(
        &self,
        id: InstructorId,
    ) -> Result<Option<Instructor>, InstructorRepositoryError>;

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Instructor>, InstructorRepositoryError>;

    /// Fetch one page of instructors ordered by id.
    async fn find_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<Instructor>, InstructorRepositoryError>;

    /// Delete the instructor unless a course references it. The reference
    /// check and the delete happen atomically.
    async fn delete_unreferenced(
        &self,
        id: InstructorId,
    ) -> Result<InstructorDeletion, InstructorRepositoryError>;
}
