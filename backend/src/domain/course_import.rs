//! Bulk course import pipeline.
//!
//! The upload must be a JSON array. Elements are handled strictly in order
//! and independently: an element that cannot be read, fails field
//! validation, or is refused by course creation counts as one failure and
//! the run moves on. Each accepted element is committed by its own
//! [`CourseCommand::create_course`] call, so earlier successes survive later
//! failures and a code repeated within one upload fails on its second use.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::ports::{CourseCommand, CourseImport, ImportSummary};
use crate::domain::{Course, CourseDraft, CoursePayload, Error};

fn parse_document(document: &[u8]) -> Result<Vec<Value>, Error> {
    let value: Value = serde_json::from_slice(document)
        .map_err(|err| Error::invalid_request(format!("upload is not valid JSON: {err}")))?;
    match value {
        Value::Array(elements) => Ok(elements),
        _ => Err(Error::invalid_request(
            "upload must contain a JSON array of courses",
        )),
    }
}

/// Import service implementing [`CourseImport`] over a [`CourseCommand`].
#[derive(Clone)]
pub struct CourseImportService<C> {
    courses: Arc<C>,
}

impl<C> CourseImportService<C> {
    /// Create an import service that stores records through `courses`.
    pub fn new(courses: Arc<C>) -> Self {
        Self { courses }
    }
}

impl<C> CourseImportService<C>
where
    C: CourseCommand,
{
    async fn import_element(&self, element: Value) -> Result<Course, Error> {
        let payload: CoursePayload = serde_json::from_value(element)
            .map_err(|err| Error::invalid_request(format!("unreadable course record: {err}")))?;
        CourseDraft::try_from(payload.clone()).map_err(Error::validation)?;
        self.courses.create_course(payload).await
    }
}

#[async_trait]
impl<C> CourseImport for CourseImportService<C>
where
    C: CourseCommand,
{
    async fn import_courses(&self, document: &[u8]) -> Result<ImportSummary, Error> {
        let elements = parse_document(document)?;
        let mut summary = ImportSummary::default();

        for (index, element) in elements.into_iter().enumerate() {
            match self.import_element(element).await {
                Ok(course) => {
                    summary.successful_records += 1;
                    debug!(index, course_id = %course.id(), "course record imported");
                }
                Err(error) => {
                    summary.failed_records += 1;
                    warn!(
                        index,
                        code = ?error.code(),
                        reason = %error,
                        field_errors = error.field_errors().len(),
                        "course record rejected"
                    );
                }
            }
        }

        info!(
            successful = summary.successful_records,
            failed = summary.failed_records,
            "course import finished"
        );
        Ok(summary)
    }
}
