//! Instructor HTTP handlers.
//!
//! ```text
//! GET    /api/instructor?page=&size=
//! POST   /api/instructor
//! PUT    /api/instructor/{id}
//! DELETE /api/instructor/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Instructor, InstructorId, InstructorPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_page_request;

/// Request payload for creating or replacing an instructor.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorRequestBody {
    #[schema(example = "Grace")]
    pub first_name: Option<String>,
    #[schema(example = "Hopper")]
    pub last_name: Option<String>,
    #[schema(example = "grace@example.org")]
    pub email: Option<String>,
}

impl From<InstructorRequestBody> for InstructorPayload {
    fn from(value: InstructorRequestBody) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
        }
    }
}

/// Instructor representation returned by the API.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorResponseBody {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&Instructor> for InstructorResponseBody {
    fn from(instructor: &Instructor) -> Self {
        Self {
            id: instructor.id().get(),
            first_name: instructor.first_name().to_owned(),
            last_name: instructor.last_name().to_owned(),
            email: instructor.email().to_owned(),
        }
    }
}

impl From<Instructor> for InstructorResponseBody {
    fn from(instructor: Instructor) -> Self {
        Self::from(&instructor)
    }
}

/// Paging query for instructor listings.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InstructorPageQuery {
    /// Zero-based page index.
    pub page: Option<u32>,
    /// Page size between 1 and 2000.
    pub size: Option<u32>,
}

/// Page envelope of instructors.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorPageBody {
    pub content: Vec<InstructorResponseBody>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl From<Page<Instructor>> for InstructorPageBody {
    fn from(page: Page<Instructor>) -> Self {
        let page = page.map(InstructorResponseBody::from);
        Self {
            page: page.page(),
            size: page.size(),
            total_elements: page.total_elements(),
            total_pages: page.total_pages(),
            content: page.into_content(),
        }
    }
}

/// List instructors ordered by identifier.
#[utoipa::path(
    get,
    path = "/api/instructor",
    params(InstructorPageQuery),
    responses(
        (status = 200, description = "Instructor page", body = InstructorPageBody),
        (status = 400, description = "Invalid paging", body = ErrorSchema)
    ),
    tags = ["instructors"],
    operation_id = "listInstructors"
)]
#[get("/instructor")]
pub async fn list_instructors(
    state: web::Data<HttpState>,
    query: web::Query<InstructorPageQuery>,
) -> ApiResult<web::Json<InstructorPageBody>> {
    let InstructorPageQuery { page, size } = query.into_inner();
    let request = parse_page_request(page, size)?;
    let page = state.instructors_query.list_instructors(request).await?;
    Ok(web::Json(page.into()))
}

/// Create an instructor.
#[utoipa::path(
    post,
    path = "/api/instructor",
    request_body = InstructorRequestBody,
    responses(
        (status = 201, description = "Instructor created", body = InstructorResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["instructors"],
    operation_id = "createInstructor"
)]
#[post("/instructor")]
pub async fn create_instructor(
    state: web::Data<HttpState>,
    payload: web::Json<InstructorRequestBody>,
) -> ApiResult<HttpResponse> {
    let instructor = state
        .instructors
        .create_instructor(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(InstructorResponseBody::from(instructor)))
}

/// Replace an instructor.
#[utoipa::path(
    put,
    path = "/api/instructor/{id}",
    params(("id" = i64, Path, description = "Instructor identifier")),
    request_body = InstructorRequestBody,
    responses(
        (status = 200, description = "Instructor updated", body = InstructorResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Instructor not found", body = ErrorSchema)
    ),
    tags = ["instructors"],
    operation_id = "updateInstructor"
)]
#[put("/instructor/{id}")]
pub async fn update_instructor(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<InstructorRequestBody>,
) -> ApiResult<web::Json<InstructorResponseBody>> {
    let instructor = state
        .instructors
        .update_instructor(
            InstructorId::new(path.into_inner()),
            payload.into_inner().into(),
        )
        .await?;
    Ok(web::Json(instructor.into()))
}

/// Delete an instructor that no course references.
#[utoipa::path(
    delete,
    path = "/api/instructor/{id}",
    params(("id" = i64, Path, description = "Instructor identifier")),
    responses(
        (status = 204, description = "Instructor deleted"),
        (status = 400, description = "Instructor still teaches courses", body = ErrorSchema),
        (status = 404, description = "Instructor not found", body = ErrorSchema)
    ),
    tags = ["instructors"],
    operation_id = "deleteInstructor"
)]
#[delete("/instructor/{id}")]
pub async fn delete_instructor(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .instructors
        .delete_instructor(InstructorId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "instructors_tests.rs"]
mod tests;
