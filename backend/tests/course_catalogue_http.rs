//! End-to-end HTTP behaviour of the course catalogue over the in-memory store.
//!
//! The app is assembled from public pieces exactly as the server does:
//! `HttpState::from_repositories`, the `Trace` middleware and
//! `inbound::http::configure`.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use courses_backend::Trace;
use courses_backend::domain::TRACE_ID_HEADER;
use courses_backend::inbound::http::configure;
use courses_backend::inbound::http::health::HealthState;
use courses_backend::inbound::http::state::HttpState;
use courses_backend::outbound::memory::InMemoryCatalogue;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn health() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

async fn catalogue_app(
    health: web::Data<HealthState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let catalogue = Arc::new(InMemoryCatalogue::new());
    let state = HttpState::from_repositories(Arc::clone(&catalogue), catalogue);
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(health)
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

fn post(uri: &str, body: Value) -> Request {
    test::TestRequest::post().uri(uri).set_json(body).to_request()
}

async fn json_of<B: MessageBody>(res: ServiceResponse<B>) -> Value {
    test::read_body_json(res).await
}

#[rstest]
#[actix_web::test]
async fn readiness_follows_health_state(health: web::Data<HealthState>) {
    let app = catalogue_app(health.clone()).await;

    let before = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    health.mark_ready();
    let after = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    let live = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/live").to_request(),
    )
    .await;

    assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(after.status(), StatusCode::OK);
    assert_eq!(live.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn catalogue_lifecycle(health: web::Data<HealthState>) {
    let app = catalogue_app(health).await;

    let instructor = test::call_service(
        &app,
        post(
            "/api/instructor",
            json!({ "firstName": "Edsger", "lastName": "Dijkstra", "email": "ewd@example.org" }),
        ),
    )
    .await;
    assert_eq!(instructor.status(), StatusCode::CREATED);
    let instructor_id = json_of(instructor).await["id"].clone();

    for (code, departments, credits) in [
        ("CS-10", json!(["COMPUTER_SCIENCE"]), json!(6)),
        ("CS-20", json!(["COMPUTER_SCIENCE", "MATHEMATICS"]), json!(6)),
        ("MA-10", json!(["MATHEMATICS"]), json!(4)),
    ] {
        let res = test::call_service(
            &app,
            post(
                "/api/course",
                json!({
                    "name": "Structured Programming",
                    "code": code,
                    "credits": credits,
                    "departments": departments,
                    "instructorId": instructor_id,
                }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    let listed = json_of(
        test::call_service(
            &app,
            post(
                "/api/course/_list",
                json!({ "credits": 6, "departments": ["MATHEMATICS"] }),
            ),
        )
        .await,
    )
    .await;
    assert_eq!(listed["totalElements"], json!(1));
    assert_eq!(listed["content"][0]["code"], json!("CS-20"));

    let detail = json_of(
        test::call_service(
            &app,
            test::TestRequest::get().uri("/api/course/1").to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(detail["instructor"]["lastName"], json!("Dijkstra"));

    let refused = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/instructor/{instructor_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(refused.status(), StatusCode::BAD_REQUEST);
    let refused = json_of(refused).await;
    assert_eq!(refused["code"], json!("conflict"));
    assert!(refused["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn report_and_upload_share_the_store(health: web::Data<HealthState>) {
    let app = catalogue_app(health).await;
    test::call_service(
        &app,
        post(
            "/api/instructor",
            json!({ "firstName": "Barbara", "lastName": "Liskov", "email": "liskov@example.org" }),
        ),
    )
    .await;

    let boundary = "catalogue-boundary";
    let document = json!([
        { "name": "Abstraction", "code": "AB-1", "departments": ["COMPUTER_SCIENCE"], "instructorId": 1 },
        { "name": "Substitution", "code": "SB-1", "departments": [], "instructorId": 1 },
        { "name": "Data Types", "code": "DT-1", "credits": 5, "departments": ["MATHEMATICS"], "instructorId": 1 }
    ]);
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"courses.json\"\r\n\
         Content-Type: application/json\r\n\r\n{document}\r\n--{boundary}--\r\n"
    );
    let upload = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/course/upload")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            ))
            .set_payload(body)
            .to_request(),
    )
    .await;
    assert_eq!(upload.status(), StatusCode::OK);
    assert_eq!(
        json_of(upload).await,
        json!({ "successfulRecords": 2, "failedRecords": 1 })
    );

    let report = test::call_service(&app, post("/api/course/_report", json!({}))).await;
    assert_eq!(report.status(), StatusCode::OK);
    let csv = test::read_body(report).await;
    let lines: Vec<&str> = std::str::from_utf8(&csv)
        .expect("utf8 report")
        .lines()
        .collect();
    assert_eq!(
        lines,
        [
            "Name,Instructor id,Department,Description,Credits,Course Code",
            "Abstraction,1,COMPUTER_SCIENCE,,,AB-1",
            "Data Types,1,MATHEMATICS,,5,DT-1",
        ]
    );
}
