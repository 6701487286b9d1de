//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every course, instructor and health endpoint
//! - **Schemas**: request and response bodies plus domain type wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`], [`DepartmentSchema`]) that keep
//!   domain types free of utoipa
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::course_files::{CourseUploadForm, ImportSummaryBody};
use crate::inbound::http::courses::{
    CourseDetailResponseBody, CourseFilterBody, CoursePageBody, CourseRequestBody,
    CourseResponseBody,
};
use crate::inbound::http::instructors::{
    InstructorPageBody, InstructorRequestBody, InstructorResponseBody,
};
use crate::inbound::http::schemas::{
    DepartmentSchema, ErrorCodeSchema, ErrorSchema, FieldErrorSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Courses backend API",
        description = "Course and instructor management with filtered listings, CSV reports and bulk import."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::course_files::course_report,
        crate::inbound::http::course_files::upload_courses,
        crate::inbound::http::instructors::list_instructors,
        crate::inbound::http::instructors::create_instructor,
        crate::inbound::http::instructors::update_instructor,
        crate::inbound::http::instructors::delete_instructor,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CourseRequestBody,
        CourseResponseBody,
        CourseDetailResponseBody,
        CourseFilterBody,
        CoursePageBody,
        CourseUploadForm,
        ImportSummaryBody,
        InstructorRequestBody,
        InstructorResponseBody,
        InstructorPageBody,
        DepartmentSchema,
        ErrorSchema,
        ErrorCodeSchema,
        FieldErrorSchema
    )),
    tags(
        (name = "courses", description = "Course management, reports and bulk import"),
        (name = "instructors", description = "Instructor management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
