//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CourseCommand, CourseImport, CourseQuery, CourseReport, CourseRepository, InstructorCommand,
    InstructorQuery, InstructorRepository,
};
use crate::domain::{CourseImportService, CourseReportService, CourseService, InstructorService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Course create, update and delete.
    pub courses: Arc<dyn CourseCommand>,
    /// Course lookup and filtered listing.
    pub courses_query: Arc<dyn CourseQuery>,
    /// CSV report generation.
    pub course_report: Arc<dyn CourseReport>,
    /// Bulk JSON import.
    pub course_import: Arc<dyn CourseImport>,
    /// Instructor create, update and delete.
    pub instructors: Arc<dyn InstructorCommand>,
    /// Instructor listing.
    pub instructors_query: Arc<dyn InstructorQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Course create, update and delete.
    pub courses: Arc<dyn CourseCommand>,
    /// Course lookup and filtered listing.
    pub courses_query: Arc<dyn CourseQuery>,
    /// CSV report generation.
    pub course_report: Arc<dyn CourseReport>,
    /// Bulk JSON import.
    pub course_import: Arc<dyn CourseImport>,
    /// Instructor create, update and delete.
    pub instructors: Arc<dyn InstructorCommand>,
    /// Instructor listing.
    pub instructors_query: Arc<dyn InstructorQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a bundle of port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use courses_backend::domain::{
    ///     CourseImportService, CourseReportService, CourseService, InstructorService,
    /// };
    /// use courses_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use courses_backend::outbound::memory::InMemoryCatalogue;
    ///
    /// let catalogue = Arc::new(InMemoryCatalogue::new());
    /// let courses = Arc::new(CourseService::new(catalogue.clone(), catalogue.clone()));
    /// let instructors = Arc::new(InstructorService::new(catalogue));
    /// let state = HttpState::new(HttpStatePorts {
    ///     courses: courses.clone(),
    ///     courses_query: courses.clone(),
    ///     course_report: Arc::new(CourseReportService::new(courses.clone())),
    ///     course_import: Arc::new(CourseImportService::new(courses)),
    ///     instructors: instructors.clone(),
    ///     instructors_query: instructors,
    /// });
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            courses,
            courses_query,
            course_report,
            course_import,
            instructors,
            instructors_query,
        } = ports;
        Self {
            courses,
            courses_query,
            course_report,
            course_import,
            instructors,
            instructors_query,
        }
    }

    /// Wire every domain service on top of the two repositories.
    pub fn from_repositories<C, I>(courses: Arc<C>, instructors: Arc<I>) -> Self
    where
        C: CourseRepository + 'static,
        I: InstructorRepository + 'static,
    {
        let course_service = Arc::new(CourseService::new(courses, Arc::clone(&instructors)));
        let instructor_service = Arc::new(InstructorService::new(instructors));
        Self::new(HttpStatePorts {
            course_report: Arc::new(CourseReportService::new(Arc::clone(&course_service))),
            course_import: Arc::new(CourseImportService::new(Arc::clone(&course_service))),
            courses: course_service.clone(),
            courses_query: course_service,
            instructors: instructor_service.clone(),
            instructors_query: instructor_service,
        })
    }
}
