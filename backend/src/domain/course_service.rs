//! Course domain service.
//!
//! Implements the course command and query driving ports on top of the
//! course and instructor repositories.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use tracing::{debug, info};

use crate::domain::instructor_service::{instructor_not_found, map_instructor_repository_error};
use crate::domain::ports::{
    CourseCommand, CourseQuery, CourseRepository, CourseRepositoryError, InstructorRepository,
};
use crate::domain::{
    Course, CourseDetail, CourseDraft, CourseId, CourseListRequest, CoursePayload,
    CoursePredicate, Error, FieldError, InstructorId,
};

/// Message attached to the `code` field when another course owns the code.
pub const CODE_TAKEN_MESSAGE: &str = "Code must be unique";

pub(crate) fn course_not_found(id: CourseId) -> Error {
    Error::not_found(format!("Course not found with ID: {id}"))
}

fn code_taken() -> Error {
    Error::validation(vec![FieldError::new("code", CODE_TAKEN_MESSAGE)])
}

fn map_course_repository_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
        CourseRepositoryError::DuplicateCode { .. } => code_taken(),
        CourseRepositoryError::MissingInstructor { instructor_id } => {
            instructor_not_found(InstructorId::new(instructor_id))
        }
    }
}

fn validate(payload: CoursePayload) -> Result<CourseDraft, Error> {
    CourseDraft::try_from(payload).map_err(Error::validation)
}

/// Course service implementing [`CourseCommand`] and [`CourseQuery`].
#[derive(Clone)]
pub struct CourseService<C, I> {
    course_repo: Arc<C>,
    instructor_repo: Arc<I>,
}

impl<C, I> CourseService<C, I> {
    /// Create a new service over the course and instructor repositories.
    pub fn new(course_repo: Arc<C>, instructor_repo: Arc<I>) -> Self {
        Self {
            course_repo,
            instructor_repo,
        }
    }
}

impl<C, I> CourseService<C, I>
where
    C: CourseRepository,
    I: InstructorRepository,
{
    /// Reject `code` when a course other than `excluded` already uses it.
    ///
    /// Updates pass their own id as `excluded` so an unchanged code is not
    /// reported as a clash with itself.
    pub async fn ensure_code_available(
        &self,
        code: &str,
        excluded: Option<CourseId>,
    ) -> Result<(), Error> {
        let existing = self
            .course_repo
            .find_by_code(code)
            .await
            .map_err(map_course_repository_error)?;
        match existing {
            Some(course) if Some(course.id()) != excluded => Err(code_taken()),
            _ => Ok(()),
        }
    }

    async fn ensure_instructor_exists(&self, id: InstructorId) -> Result<(), Error> {
        self.instructor_repo
            .find_by_id(id)
            .await
            .map_err(map_instructor_repository_error)?
            .map(|_| ())
            .ok_or_else(|| instructor_not_found(id))
    }
}

#[async_trait]
impl<C, I> CourseCommand for CourseService<C, I>
where
    C: CourseRepository,
    I: InstructorRepository,
{
    async fn create_course(&self, payload: CoursePayload) -> Result<Course, Error> {
        let draft = validate(payload)?;
        self.ensure_code_available(draft.code(), None).await?;
        self.ensure_instructor_exists(draft.instructor_id()).await?;

        let course = self
            .course_repo
            .insert(&draft)
            .await
            .map_err(map_course_repository_error)?;
        info!(course_id = %course.id(), code = course.code(), "course created");
        Ok(course)
    }

    async fn update_course(&self, id: CourseId, payload: CoursePayload) -> Result<Course, Error> {
        let draft = validate(payload)?;
        self.course_repo
            .find_by_id(id)
            .await
            .map_err(map_course_repository_error)?
            .ok_or_else(|| course_not_found(id))?;
        self.ensure_code_available(draft.code(), Some(id)).await?;
        self.ensure_instructor_exists(draft.instructor_id()).await?;

        let course = self
            .course_repo
            .update(id, &draft)
            .await
            .map_err(map_course_repository_error)?
            .ok_or_else(|| course_not_found(id))?;
        info!(course_id = %id, "course updated");
        Ok(course)
    }

    async fn delete_course(&self, id: CourseId) -> Result<(), Error> {
        let deleted = self
            .course_repo
            .delete(id)
            .await
            .map_err(map_course_repository_error)?;
        if !deleted {
            return Err(course_not_found(id));
        }
        info!(course_id = %id, "course deleted");
        Ok(())
    }
}

#[async_trait]
impl<C, I> CourseQuery for CourseService<C, I>
where
    C: CourseRepository,
    I: InstructorRepository,
{
    async fn get_course(&self, id: CourseId) -> Result<CourseDetail, Error> {
        self.course_repo
            .find_detail(id)
            .await
            .map_err(map_course_repository_error)?
            .ok_or_else(|| course_not_found(id))
    }

    async fn list_courses(&self, request: CourseListRequest) -> Result<Page<Course>, Error> {
        let predicate = CoursePredicate::from_filter(&request.filter);
        debug!(
            clauses = predicate.clauses().len(),
            page = request.page.page(),
            size = request.page.size(),
            "listing courses"
        );
        self.course_repo
            .find_page(&predicate, request.page)
            .await
            .map_err(map_course_repository_error)
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
