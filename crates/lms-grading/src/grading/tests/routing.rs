use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::grading::router::{gpax_handler, preview_handler};
use crate::grading::{grading_router, GradingPolicy, GradingService, NoAttendance};

fn seeded_router() -> axum::Router {
    let (service, repository) = build_service();
    let first = first_term();
    let second = second_term();
    repository.enroll(first.clone());
    repository.enroll(second.clone());
    repository.insert(record(&first, "ท21101", "ท", 3.0, grade_four()));
    repository.insert(record(&first, "ค21101", "ค", 1.0, grade_three()));
    repository.insert(record(&second, "ท21102", "ท", 2.0, grade_three()));
    grading_router(Arc::new(service))
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn preview_route_grades_components() {
    let response = seeded_router()
        .oneshot(
            Request::post("/api/v1/grades/preview")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "classwork": 25, "midterm": 15, "final": 45 }).to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["graded"], json!(true));
    assert_eq!(payload["grade_point"], json!(4.0));
    assert_eq!(payload["grade_label"], json!("4"));
    assert_eq!(payload["percentage"], json!(85.0));
}

#[tokio::test]
async fn preview_handler_rejects_negative_scores() {
    let service = Arc::new(GradingService::new(
        Arc::new(MemoryGradeRepository::default()),
        Arc::new(NoAttendance),
        GradingPolicy::default(),
    ));

    let response = preview_handler::<MemoryGradeRepository, NoAttendance>(
        State(service),
        axum::Json(scores(-3.0, 10.0, 10.0)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("classwork"));
}

#[tokio::test]
async fn semester_gpa_route_returns_weighted_gpa() {
    let response = seeded_router()
        .oneshot(get("/api/v1/students/s-001/semesters/2567-1/gpa"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["gpa"], json!(3.75));
    assert_eq!(payload["total_credits"], json!(4.0));
    assert_eq!(payload["semester_label"], json!("1/2567"));
}

#[tokio::test]
async fn gpax_route_returns_cumulative_history() {
    let response = seeded_router()
        .oneshot(get("/api/v1/students/s-001/gpax"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    // (3.75 * 4 + 3.0 * 2) / 6
    assert_eq!(payload["gpax"], json!(3.5));
    assert_eq!(payload["semesters"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn report_card_route_groups_subject_areas() {
    let response = seeded_router()
        .oneshot(get("/api/v1/students/s-001/semesters/2567-1/report-card"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["student"]["full_name"], json!("Somchai Jaidee"));
    assert_eq!(payload["subject_areas"][0]["area_code"], json!("ท"));
    assert_eq!(payload["subject_areas"][1]["area_code"], json!("ค"));
    assert_eq!(payload["gpa"]["gpa"], json!(3.75));
}

#[tokio::test]
async fn transcript_route_returns_learning_area_totals() {
    let response = seeded_router()
        .oneshot(get("/api/v1/students/s-001/transcript"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["gpax"], json!(3.5));
    assert_eq!(payload["learning_areas"][0]["area_code"], json!("ท"));
    assert_eq!(payload["learning_areas"][0]["total_credits"], json!(5.0));
}

#[tokio::test]
async fn unknown_student_returns_not_found() {
    let response = seeded_router()
        .oneshot(get("/api/v1/students/s-404/transcript"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_student_gpax_returns_not_found() {
    let response = seeded_router()
        .oneshot(get("/api/v1/students/s-404/gpax"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("s-404"));
}

#[tokio::test]
async fn gpax_without_semesters_reports_positive_zeros() {
    let (service, _) = build_service();
    let response = grading_router(Arc::new(service))
        .oneshot(get("/api/v1/students/s-001/gpax"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["semesters"], json!([]));
    for field in ["gpax", "total_credits", "earned_credits"] {
        let value = payload[field].as_f64().expect("numeric field");
        assert!(value == 0.0 && value.is_sign_positive(), "{field} is {value}");
    }
}

#[tokio::test]
async fn unknown_semester_returns_not_found() {
    let response = seeded_router()
        .oneshot(get("/api/v1/students/s-001/semesters/2599-1/gpa"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("2599-1"));
}

#[tokio::test]
async fn repository_outage_returns_internal_error() {
    let service = Arc::new(GradingService::new(
        Arc::new(UnavailableRepository),
        Arc::new(NoAttendance),
        GradingPolicy::default(),
    ));

    let response = gpax_handler::<UnavailableRepository, NoAttendance>(
        State(service),
        Path("s-001".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
