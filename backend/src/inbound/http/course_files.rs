//! Course report download and bulk upload handlers.
//!
//! ```text
//! POST /api/course/_report
//! POST /api/course/upload
//! ```

use actix_multipart::{Field, Multipart};
use actix_web::http::header::{ContentDisposition, ContentType};
use actix_web::{HttpResponse, post, web};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::ImportSummary;
use crate::domain::{CourseListRequest, Error, REPORT_FILE_NAME};
use crate::inbound::http::ApiResult;
use crate::inbound::http::courses::CourseFilterBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Name of the multipart part carrying the upload.
pub const UPLOAD_PART_NAME: &str = "file";

/// Largest accepted upload in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Multipart form accepted by the upload endpoint.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CourseUploadForm {
    /// JSON array of course objects.
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummaryBody {
    pub successful_records: u64,
    pub failed_records: u64,
}

impl From<ImportSummary> for ImportSummaryBody {
    fn from(value: ImportSummary) -> Self {
        Self {
            successful_records: value.successful_records,
            failed_records: value.failed_records,
        }
    }
}

/// Download every course matching the filter as CSV.
#[utoipa::path(
    post,
    path = "/api/course/_report",
    request_body = CourseFilterBody,
    responses(
        (status = 200, description = "CSV report attachment", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "courseReport"
)]
#[post("/course/_report")]
pub async fn course_report(
    state: web::Data<HttpState>,
    payload: web::Json<CourseFilterBody>,
) -> ApiResult<HttpResponse> {
    let request = CourseListRequest::try_from(payload.into_inner())?;
    let report = state.course_report.generate_report(request).await?;
    Ok(HttpResponse::Ok()
        .insert_header(ContentType::octet_stream())
        .insert_header(ContentDisposition::attachment(REPORT_FILE_NAME))
        .body(report))
}

fn map_multipart_error(error: actix_multipart::MultipartError) -> Error {
    Error::invalid_request(format!("malformed multipart upload: {error}"))
}

async fn read_part(mut field: Field) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(map_multipart_error)? {
        if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(Error::invalid_request(format!(
                "upload exceeds {MAX_UPLOAD_BYTES} bytes"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_upload(mut multipart: Multipart) -> Result<Vec<u8>, Error> {
    while let Some(field) = multipart.try_next().await.map_err(map_multipart_error)? {
        if field.name() == Some(UPLOAD_PART_NAME) {
            return read_part(field).await;
        }
        debug!(part = ?field.name(), "ignoring multipart part");
    }
    Err(Error::invalid_request(format!(
        "multipart upload must include a `{UPLOAD_PART_NAME}` part"
    )))
}

/// Import a JSON array of courses, one record at a time.
#[utoipa::path(
    post,
    path = "/api/course/upload",
    request_body(content = CourseUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import finished", body = ImportSummaryBody),
        (status = 400, description = "Upload is not a JSON array", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "uploadCourses"
)]
#[post("/course/upload")]
pub async fn upload_courses(
    state: web::Data<HttpState>,
    multipart: Multipart,
) -> ApiResult<web::Json<ImportSummaryBody>> {
    let document = read_upload(multipart).await?;
    let summary = state.course_import.import_courses(&document).await?;
    Ok(web::Json(summary.into()))
}

#[cfg(test)]
#[path = "course_files_tests.rs"]
mod tests;
