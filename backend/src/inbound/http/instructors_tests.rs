//! HTTP tests for the instructor endpoints, backed by the in-memory catalogue.

use actix_http::Request;
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::inbound::http::test_utils::{init_app, memory_state};

fn instructor_json(first_name: &str, email: &str) -> Value {
    json!({ "firstName": first_name, "lastName": "Lovelace", "email": email })
}

fn post_instructor(body: &Value) -> Request {
    test::TestRequest::post()
        .uri("/api/instructor")
        .set_json(body)
        .to_request()
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_instructor() {
    let (state, _) = memory_state();
    let app = init_app(state).await;

    let res = test::call_service(&app, post_instructor(&instructor_json("Ada", "ada@example.org"))).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: InstructorResponseBody = test::read_body_json(res).await;
    assert_eq!(body.id, 1);
    assert_eq!(body.first_name, "Ada");
    assert_eq!(body.email, "ada@example.org");
}

#[rstest]
#[case(json!({}), &["firstName", "lastName", "email"])]
#[case(json!({ "firstName": "A", "lastName": "Lovelace", "email": "ada@example.org" }), &["firstName"])]
#[case(json!({ "firstName": "Ada", "lastName": "Lovelace", "email": "not-an-email" }), &["email"])]
#[actix_web::test]
async fn create_reports_invalid_fields(#[case] body: Value, #[case] fields: &[&str]) {
    let (state, _) = memory_state();
    let app = init_app(state).await;

    let res = test::call_service(&app, post_instructor(&body)).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(res).await;
    let rejected: Vec<&str> = error
        .get("fieldErrors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|error| error.get("field").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(rejected, fields);
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_rejected() {
    let (state, _) = memory_state();
    let app = init_app(state).await;

    let first = test::call_service(&app, post_instructor(&instructor_json("Ada", "ada@example.org"))).await;
    let second = test::call_service(&app, post_instructor(&instructor_json("Augusta", "ada@example.org"))).await;

    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(second).await;
    assert_eq!(
        error.get("fieldErrors"),
        Some(&json!([{ "field": "email", "message": "Email must be unique" }]))
    );
}

#[rstest]
#[actix_web::test]
async fn update_replaces_instructor() {
    let (state, _) = memory_state();
    let app = init_app(state).await;
    test::call_service(&app, post_instructor(&instructor_json("Ada", "ada@example.org"))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/instructor/1")
            .set_json(instructor_json("Augusta", "ada@example.org"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: InstructorResponseBody = test::read_body_json(res).await;
    assert_eq!(body.first_name, "Augusta");
}

#[rstest]
#[actix_web::test]
async fn update_unknown_instructor_is_not_found() {
    let (state, _) = memory_state();
    let app = init_app(state).await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/instructor/42")
            .set_json(instructor_json("Ada", "ada@example.org"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let error: Value = test::read_body_json(res).await;
    assert_eq!(
        error.get("message"),
        Some(&json!("Instructor not found with ID: 42"))
    );
}

#[rstest]
#[actix_web::test]
async fn delete_refuses_instructor_with_courses() {
    let (state, _) = memory_state();
    let app = init_app(state).await;
    test::call_service(&app, post_instructor(&instructor_json("Ada", "ada@example.org"))).await;
    let course = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/course")
            .set_json(json!({
                "name": "Analytical Engines",
                "code": "AE-1",
                "departments": ["MATHEMATICS"],
                "instructorId": 1,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(course.status(), StatusCode::CREATED);

    let refused = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/instructor/1").to_request(),
    )
    .await;
    assert_eq!(refused.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(refused).await;
    assert_eq!(
        error.get("message"),
        Some(&json!(
            "Cannot delete instructor with ID: 1 as there are courses associated with them."
        ))
    );

    let removed = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/course/1").to_request(),
    )
    .await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);
    let deleted = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/instructor/1").to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[actix_web::test]
async fn list_pages_in_identifier_order() {
    let (state, _) = memory_state();
    let app = init_app(state).await;
    for (name, email) in [
        ("Ada", "ada@example.org"),
        ("Alan", "alan@example.org"),
        ("Grace", "grace@example.org"),
    ] {
        test::call_service(&app, post_instructor(&instructor_json(name, email))).await;
    }

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/instructor?page=1&size=2")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let page: InstructorPageBody = test::read_body_json(res).await;
    assert_eq!((page.page, page.size), (1, 2));
    assert_eq!((page.total_elements, page.total_pages), (3, 2));
    let names: Vec<&str> = page
        .content
        .iter()
        .map(|instructor| instructor.first_name.as_str())
        .collect();
    assert_eq!(names, ["Grace"]);
}

#[rstest]
#[case("/api/instructor?size=0")]
#[case("/api/instructor?size=5000")]
#[case("/api/instructor?page=first")]
#[actix_web::test]
async fn list_rejects_bad_paging(#[case] uri: &str) {
    let (state, _) = memory_state();
    let app = init_app(state).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
