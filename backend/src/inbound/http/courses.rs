//! Course HTTP handlers.
//!
//! ```text
//! POST   /api/course
//! GET    /api/course/{id}
//! PUT    /api/course/{id}
//! DELETE /api/course/{id}
//! POST   /api/course/_list
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Course, CourseDetail, CourseFilter, CourseId, CourseListRequest, CoursePayload, Department,
    Error, InstructorId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::instructors::InstructorResponseBody;
use crate::inbound::http::schemas::{DepartmentSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_page_request;

/// Request payload for creating or replacing a course.
///
/// Every field is optional on the wire so that missing values surface as
/// field errors rather than deserialisation failures.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequestBody {
    #[schema(example = "Compilers")]
    pub name: Option<String>,
    #[schema(example = "CS-401")]
    pub code: Option<String>,
    pub description: Option<String>,
    #[schema(maximum = 100, example = 8)]
    pub credits: Option<i32>,
    #[schema(value_type = Option<Vec<DepartmentSchema>>)]
    pub departments: Option<Vec<Department>>,
    #[schema(example = 1)]
    pub instructor_id: Option<i64>,
}

impl From<CourseRequestBody> for CoursePayload {
    fn from(value: CourseRequestBody) -> Self {
        Self {
            name: value.name,
            code: value.code,
            description: value.description,
            credits: value.credits,
            departments: value.departments,
            instructor_id: value.instructor_id,
        }
    }
}

/// Course representation returned by the API.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponseBody {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub credits: Option<i32>,
    #[schema(value_type = Vec<DepartmentSchema>)]
    pub departments: Vec<Department>,
    pub instructor_id: i64,
}

impl From<&Course> for CourseResponseBody {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id().get(),
            name: course.name().to_owned(),
            code: course.code().to_owned(),
            description: course.description().map(str::to_owned),
            credits: course.credits(),
            departments: course.departments().iter().collect(),
            instructor_id: course.instructor_id().get(),
        }
    }
}

impl From<Course> for CourseResponseBody {
    fn from(course: Course) -> Self {
        Self::from(&course)
    }
}

/// Course with its instructor embedded.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailResponseBody {
    #[serde(flatten)]
    pub course: CourseResponseBody,
    pub instructor: InstructorResponseBody,
}

impl From<CourseDetail> for CourseDetailResponseBody {
    fn from(detail: CourseDetail) -> Self {
        Self {
            course: CourseResponseBody::from(&detail.course),
            instructor: InstructorResponseBody::from(&detail.instructor),
        }
    }
}

/// Filter and paging for course listings and reports.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseFilterBody {
    pub instructor_id: Option<i64>,
    pub credits: Option<i32>,
    #[schema(value_type = Option<Vec<DepartmentSchema>>)]
    pub departments: Option<Vec<Department>>,
    #[schema(minimum = 0, example = 0)]
    pub page: Option<u32>,
    #[schema(minimum = 1, maximum = 2000, example = 20)]
    pub size: Option<u32>,
}

impl TryFrom<CourseFilterBody> for CourseListRequest {
    type Error = Error;

    fn try_from(body: CourseFilterBody) -> Result<Self, Self::Error> {
        let page = parse_page_request(body.page, body.size)?;
        Ok(Self {
            filter: CourseFilter {
                instructor_id: body.instructor_id.map(InstructorId::new),
                credits: body.credits,
                departments: body.departments.unwrap_or_default().into_iter().collect(),
            },
            page,
        })
    }
}

/// Page envelope of courses.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoursePageBody {
    pub content: Vec<CourseResponseBody>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl From<Page<Course>> for CoursePageBody {
    fn from(page: Page<Course>) -> Self {
        let page = page.map(CourseResponseBody::from);
        Self {
            page: page.page(),
            size: page.size(),
            total_elements: page.total_elements(),
            total_pages: page.total_pages(),
            content: page.into_content(),
        }
    }
}

/// Create a course.
#[utoipa::path(
    post,
    path = "/api/course",
    request_body = CourseRequestBody,
    responses(
        (status = 201, description = "Course created", body = CourseResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Instructor not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/course")]
pub async fn create_course(
    state: web::Data<HttpState>,
    payload: web::Json<CourseRequestBody>,
) -> ApiResult<HttpResponse> {
    let course = state
        .courses
        .create_course(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(CourseResponseBody::from(course)))
}

/// Fetch a course together with its instructor.
#[utoipa::path(
    get,
    path = "/api/course/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponseBody),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/course/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CourseDetailResponseBody>> {
    let detail = state
        .courses_query
        .get_course(CourseId::new(path.into_inner()))
        .await?;
    Ok(web::Json(detail.into()))
}

/// Replace a course.
#[utoipa::path(
    put,
    path = "/api/course/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    request_body = CourseRequestBody,
    responses(
        (status = 200, description = "Course updated", body = CourseResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Course or instructor not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/course/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CourseRequestBody>,
) -> ApiResult<web::Json<CourseResponseBody>> {
    let course = state
        .courses
        .update_course(CourseId::new(path.into_inner()), payload.into_inner().into())
        .await?;
    Ok(web::Json(course.into()))
}

/// Delete a course.
#[utoipa::path(
    delete,
    path = "/api/course/{id}",
    params(("id" = i64, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/course/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .courses
        .delete_course(CourseId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List courses matching every supplied filter.
#[utoipa::path(
    post,
    path = "/api/course/_list",
    request_body = CourseFilterBody,
    responses(
        (status = 200, description = "Course page", body = CoursePageBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[post("/course/_list")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    payload: web::Json<CourseFilterBody>,
) -> ApiResult<web::Json<CoursePageBody>> {
    let request = CourseListRequest::try_from(payload.into_inner())?;
    let page = state.courses_query.list_courses(request).await?;
    Ok(web::Json(page.into()))
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
