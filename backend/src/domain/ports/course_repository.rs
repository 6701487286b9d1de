//! Port for course persistence and filtered page reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Course, CourseDetail, CourseDraft, CourseId, CoursePredicate};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "course repository query failed: {message}",
        /// Another course already uses the code.
        DuplicateCode { code: String } =>
            "course code already exists: {code}",
        /// The referenced instructor row does not exist.
        MissingInstructor { instructor_id: i64 } =>
            "instructor does not exist: {instructor_id}",
    }
}

/// Port for reading and writing courses.
///
/// Each mutating call is atomic on its own; callers compose them without a
/// surrounding transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Store a new course and return it with its generated id.
    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError>;

    /// Replace every field of an existing course. `None` when absent.
    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// Remove a course. `false` when absent.
    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError>;

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Course joined with its instructor.
    async fn find_detail(
        &self,
        id: CourseId,
    ) -> Result<Option<CourseDetail>, CourseRepositoryError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, CourseRepositoryError>;

    /// Fetch one page of courses matching `predicate`, ordered by id, plus
    /// the total number of matches.
    async fn find_page(
        &self,
        predicate: &CoursePredicate,
        request: PageRequest,
    ) -> Result<Page<Course>, CourseRepositoryError>;
}
