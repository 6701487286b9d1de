//! HTTP inbound adapter exposing REST endpoints.

pub mod course_files;
pub mod courses;
pub mod error;
pub mod health;
pub mod instructors;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register extractor error handling, the `/api` resources and the probes.
///
/// Callers supply `web::Data<HttpState>` and `web::Data<HealthState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    validation::configure(cfg);
    cfg.service(
        web::scope("/api")
            .service(courses::create_course)
            .service(courses::list_courses)
            .service(course_files::course_report)
            .service(course_files::upload_courses)
            .service(courses::get_course)
            .service(courses::update_course)
            .service(courses::delete_course)
            .service(instructors::list_instructors)
            .service(instructors::create_instructor)
            .service(instructors::update_instructor)
            .service(instructors::delete_instructor),
    )
    .service(health::ready)
    .service(health::live);
}
