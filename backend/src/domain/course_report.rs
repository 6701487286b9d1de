//! CSV course report generator.
//!
//! Walks every page of a filtered course listing and writes one CSV row per
//! course into an in-memory buffer. Pages are fetched one after another with
//! no lock held in between, so rows inserted or removed mid-report can shift
//! page boundaries; the loop stops once the page index reaches the latest
//! reported page count.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{CourseQuery, CourseReport};
use crate::domain::{Course, CourseListRequest, Error};

/// Column titles written as the first row of every report.
pub const REPORT_HEADER: [&str; 6] = [
    "Name",
    "Instructor id",
    "Department",
    "Description",
    "Credits",
    "Course Code",
];

/// File name offered to clients downloading a report.
pub const REPORT_FILE_NAME: &str = "courses-report.csv";

fn course_record(course: &Course) -> [String; 6] {
    [
        course.name().to_owned(),
        course.instructor_id().to_string(),
        course.departments().encode(),
        course.description().unwrap_or_default().to_owned(),
        course
            .credits()
            .map(|credits| credits.to_string())
            .unwrap_or_default(),
        course.code().to_owned(),
    ]
}

fn map_csv_error(error: csv::Error) -> Error {
    Error::internal(format!("failed to write course report: {error}"))
}

/// Report service implementing [`CourseReport`] over a [`CourseQuery`].
#[derive(Clone)]
pub struct CourseReportService<Q> {
    courses: Arc<Q>,
}

impl<Q> CourseReportService<Q> {
    /// Create a report service reading through the course query port.
    pub fn new(courses: Arc<Q>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl<Q> CourseReport for CourseReportService<Q>
where
    Q: CourseQuery,
{
    async fn generate_report(&self, request: CourseListRequest) -> Result<Vec<u8>, Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(REPORT_HEADER).map_err(map_csv_error)?;

        let mut request = request;
        let mut page_index: u32 = 0;
        let mut rows: u64 = 0;
        loop {
            request.page = request.page.with_page(page_index);
            let page = self.courses.list_courses(request.clone()).await?;
            for course in page.content() {
                writer
                    .write_record(course_record(course))
                    .map_err(map_csv_error)?;
                rows += 1;
            }

            let Some(next) = page_index.checked_add(1) else {
                break;
            };
            page_index = next;
            if u64::from(page_index) >= page.total_pages() {
                break;
            }
        }

        debug!(rows, pages = page_index, "course report written");
        writer
            .into_inner()
            .map_err(|error| Error::internal(format!("failed to flush course report: {error}")))
    }
}
