//! Instructor domain service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::{info, warn};

use crate::domain::ports::{
    InstructorCommand, InstructorDeletion, InstructorQuery, InstructorRepository,
    InstructorRepositoryError,
};
use crate::domain::{
    Error, FieldError, Instructor, InstructorDraft, InstructorId, InstructorPayload,
};

/// Message attached to the `email` field when another instructor owns it.
pub const EMAIL_TAKEN_MESSAGE: &str = "Email must be unique";

pub(crate) fn instructor_not_found(id: InstructorId) -> Error {
    Error::not_found(format!("Instructor not found with ID: {id}"))
}

fn email_taken() -> Error {
    Error::validation(vec![FieldError::new("email", EMAIL_TAKEN_MESSAGE)])
}

pub(crate) fn map_instructor_repository_error(error: InstructorRepositoryError) -> Error {
    match error {
        InstructorRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("instructor repository unavailable: {message}"))
        }
        InstructorRepositoryError::Query { message } => {
            Error::internal(format!("instructor repository error: {message}"))
        }
        InstructorRepositoryError::DuplicateEmail { .. } => email_taken(),
    }
}

/// Instructor service implementing [`InstructorCommand`] and
/// [`InstructorQuery`].
#[derive(Clone)]
pub struct InstructorService<R> {
    instructor_repo: Arc<R>,
}

impl<R> InstructorService<R> {
    /// Create a new service with the instructor repository.
    pub fn new(instructor_repo: Arc<R>) -> Self {
        Self { instructor_repo }
    }
}

impl<R> InstructorService<R>
where
    R: InstructorRepository,
{
    /// Reject `email` when an instructor other than `excluded` already uses it.
    pub async fn ensure_email_available(
        &self,
        email: &str,
        excluded: Option<InstructorId>,
    ) -> Result<(), Error> {
        let existing = self
            .instructor_repo
            .find_by_email(email)
            .await
            .map_err(map_instructor_repository_error)?;
        match existing {
            Some(instructor) if Some(instructor.id()) != excluded => Err(email_taken()),
            _ => Ok(()),
        }
    }
}

fn validate(payload: InstructorPayload) -> Result<InstructorDraft, Error> {
    InstructorDraft::try_from(payload).map_err(Error::validation)
}

#[async_trait]
impl<R> InstructorCommand for InstructorService<R>
where
    R: InstructorRepository,
{
    async fn create_instructor(&self, payload: InstructorPayload) -> Result<Instructor, Error> {
        let draft = validate(payload)?;
        self.ensure_email_available(draft.email(), None).await?;
        let instructor = self
            .instructor_repo
            .insert(&draft)
            .await
            .map_err(map_instructor_repository_error)?;
        info!(instructor_id = %instructor.id(), "instructor created");
        Ok(instructor)
    }

    async fn update_instructor(
        &self,
        id: InstructorId,
        payload: InstructorPayload,
    ) -> Result<Instructor, Error> {
        let draft = validate(payload)?;
        self.instructor_repo
            .find_by_id(id)
            .await
            .map_err(map_instructor_repository_error)?
            .ok_or_else(|| instructor_not_found(id))?;
        self.ensure_email_available(draft.email(), Some(id)).await?;

        let instructor = self
            .instructor_repo
            .update(id, &draft)
            .await
            .map_err(map_instructor_repository_error)?
            .ok_or_else(|| instructor_not_found(id))?;
        info!(instructor_id = %id, "instructor updated");
        Ok(instructor)
    }

    async fn delete_instructor(&self, id: InstructorId) -> Result<(), Error> {
        let outcome = self
            .instructor_repo
            .delete_unreferenced(id)
            .await
            .map_err(map_instructor_repository_error)?;
        match outcome {
            InstructorDeletion::Deleted => {
                info!(instructor_id = %id, "instructor deleted");
                Ok(())
            }
            InstructorDeletion::NotFound => Err(instructor_not_found(id)),
            InstructorDeletion::Referenced { course_count } => {
                warn!(instructor_id = %id, course_count, "instructor still teaches courses");
                Err(Error::conflict(format!(
                    "Cannot delete instructor with ID: {id} as there are courses associated with them."
                )))
            }
        }
    }
}

#[async_trait]
impl<R> InstructorQuery for InstructorService<R>
where
    R: InstructorRepository,
{
    async fn list_instructors(&self, request: PageRequest) -> Result<Page<Instructor>, Error> {
        self.instructor_repo
            .find_page(request)
            .await
            .map_err(map_instructor_repository_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the instructor service.
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockInstructorRepository;

    #[fixture]
    fn payload() -> InstructorPayload {
        InstructorPayload {
            first_name: Some("Alan".to_owned()),
            last_name: Some("Turing".to_owned()),
            email: Some("alan@example.org".to_owned()),
        }
    }

    fn stored(id: i64, payload: InstructorPayload) -> Instructor {
        Instructor::new(
            InstructorId::new(id),
            InstructorDraft::try_from(payload).expect("valid instructor"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn create_rejects_taken_email(payload: InstructorPayload) {
        let existing = stored(1, payload.clone());
        let mut repo = MockInstructorRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "alan@example.org")
            .return_once(move |_| Ok(Some(existing)));
        repo.expect_insert().times(0);

        let error = InstructorService::new(Arc::new(repo))
            .create_instructor(payload)
            .await
            .expect_err("duplicate email");

        assert_eq!(
            error.field_errors(),
            [FieldError::new("email", EMAIL_TAKEN_MESSAGE)]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn create_stores_valid_instructor(payload: InstructorPayload) {
        let created = stored(2, payload.clone());
        let mut repo = MockInstructorRepository::new();
        repo.expect_find_by_email().return_once(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .return_once(move |_| Ok(created));

        let instructor = InstructorService::new(Arc::new(repo))
            .create_instructor(payload)
            .await
            .expect("create succeeds");

        assert_eq!(instructor.id(), InstructorId::new(2));
    }

    #[rstest]
    #[tokio::test]
    async fn update_ignores_own_email(payload: InstructorPayload) {
        let current = stored(3, payload.clone());
        let same = current.clone();
        let updated = current.clone();
        let mut repo = MockInstructorRepository::new();
        repo.expect_find_by_id()
            .with(eq(InstructorId::new(3)))
            .return_once(move |_| Ok(Some(current)));
        repo.expect_find_by_email()
            .return_once(move |_| Ok(Some(same)));
        repo.expect_update()
            .times(1)
            .return_once(move |_, _| Ok(Some(updated)));

        let result = InstructorService::new(Arc::new(repo))
            .update_instructor(InstructorId::new(3), payload)
            .await;

        assert!(result.is_ok());
    }

    #[rstest]
    #[case(InstructorDeletion::Deleted, None)]
    #[case(InstructorDeletion::NotFound, Some(ErrorCode::NotFound))]
    #[case(
        InstructorDeletion::Referenced { course_count: 2 },
        Some(ErrorCode::Conflict)
    )]
    #[tokio::test]
    async fn delete_maps_outcomes(
        #[case] outcome: InstructorDeletion,
        #[case] expected: Option<ErrorCode>,
    ) {
        let mut repo = MockInstructorRepository::new();
        repo.expect_delete_unreferenced()
            .with(eq(InstructorId::new(8)))
            .return_once(move |_| Ok(outcome));

        let result = InstructorService::new(Arc::new(repo))
            .delete_instructor(InstructorId::new(8))
            .await;

        assert_eq!(result.err().map(|error| error.code()), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_conflict_names_instructor() {
        let mut repo = MockInstructorRepository::new();
        repo.expect_delete_unreferenced()
            .return_once(|_| Ok(InstructorDeletion::Referenced { course_count: 1 }));

        let error = InstructorService::new(Arc::new(repo))
            .delete_instructor(InstructorId::new(8))
            .await
            .expect_err("referenced instructor");

        assert_eq!(
            error.message(),
            "Cannot delete instructor with ID: 8 as there are courses associated with them."
        );
    }

    #[rstest]
    #[tokio::test]
    async fn list_maps_connection_failures() {
        let mut repo = MockInstructorRepository::new();
        repo.expect_find_page()
            .return_once(|_| Err(InstructorRepositoryError::connection("pool closed")));

        let error = InstructorService::new(Arc::new(repo))
            .list_instructors(PageRequest::default())
            .await
            .expect_err("outage");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
