//! Domain model for the course catalogue.
//!
//! Purpose: define course and instructor entities, their validation rules,
//! the filter predicates used to list courses, and the services behind every
//! use-case. Nothing here depends on HTTP or on a particular database.
//!
//! Public surface:
//! - Entities: [`Course`], [`Instructor`], [`Department`], [`DepartmentSet`].
//! - Listing: [`CourseFilter`], [`CoursePredicate`], [`CourseListRequest`].
//! - Services: [`CourseService`], [`InstructorService`],
//!   [`CourseReportService`], [`CourseImportService`].
//! - Errors: [`Error`], [`ErrorCode`], [`FieldError`].

pub mod course;
pub mod course_filter;
pub mod course_import;
pub mod course_report;
pub mod course_service;
pub mod department;
pub mod error;
pub mod instructor;
pub mod instructor_service;
pub mod ports;
pub mod trace_id;

pub use self::course::{Course, CourseDetail, CourseDraft, CourseId, CoursePayload};
pub use self::course_filter::{CourseClause, CourseFilter, CourseListRequest, CoursePredicate};
pub use self::course_import::CourseImportService;
pub use self::course_report::{CourseReportService, REPORT_FILE_NAME, REPORT_HEADER};
pub use self::course_service::CourseService;
pub use self::department::{DEPARTMENT_DELIMITER, Department, DepartmentError, DepartmentSet};
pub use self::error::{Error, ErrorCode, ErrorValidationError, FieldError};
pub use self::instructor::{Instructor, InstructorDraft, InstructorId, InstructorPayload};
pub use self::instructor_service::InstructorService;
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
