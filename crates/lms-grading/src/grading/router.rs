use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ScoreComponents, SemesterId, StudentId};
use super::repository::{AttendanceSource, GradeRepository, RepositoryError};
use super::service::{GradingService, GradingServiceError};

/// Router builder exposing the grading engine over HTTP.
pub fn grading_router<R, A>(service: Arc<GradingService<R, A>>) -> Router
where
    R: GradeRepository + 'static,
    A: AttendanceSource + 'static,
{
    Router::new()
        .route("/api/v1/grades/preview", post(preview_handler::<R, A>))
        .route(
            "/api/v1/students/:student_id/semesters/:semester_id/gpa",
            get(semester_gpa_handler::<R, A>),
        )
        .route(
            "/api/v1/students/:student_id/semesters/:semester_id/report-card",
            get(report_card_handler::<R, A>),
        )
        .route(
            "/api/v1/students/:student_id/gpax",
            get(gpax_handler::<R, A>),
        )
        .route(
            "/api/v1/students/:student_id/transcript",
            get(transcript_handler::<R, A>),
        )
        .with_state(service)
}

pub(crate) fn error_response(error: &GradingServiceError) -> Response {
    let status = match error {
        GradingServiceError::Validation(_) | GradingServiceError::Scale(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        GradingServiceError::StudentNotFound(_)
        | GradingServiceError::SemesterNotFound { .. }
        | GradingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        GradingServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(result: Result<T, GradingServiceError>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, axum::Json(body)).into_response(),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn preview_handler<R, A>(
    State(service): State<Arc<GradingService<R, A>>>,
    axum::Json(components): axum::Json<ScoreComponents>,
) -> Response
where
    R: GradeRepository + 'static,
    A: AttendanceSource + 'static,
{
    respond(service.grade_preview(components))
}

pub(crate) async fn semester_gpa_handler<R, A>(
    State(service): State<Arc<GradingService<R, A>>>,
    Path((student_id, semester_id)): Path<(String, String)>,
) -> Response
where
    R: GradeRepository + 'static,
    A: AttendanceSource + 'static,
{
    respond(service.semester_gpa(&StudentId(student_id), &SemesterId(semester_id)))
}

pub(crate) async fn report_card_handler<R, A>(
    State(service): State<Arc<GradingService<R, A>>>,
    Path((student_id, semester_id)): Path<(String, String)>,
) -> Response
where
    R: GradeRepository + 'static,
    A: AttendanceSource + 'static,
{
    respond(service.report_card(&StudentId(student_id), &SemesterId(semester_id)))
}

pub(crate) async fn gpax_handler<R, A>(
    State(service): State<Arc<GradingService<R, A>>>,
    Path(student_id): Path<String>,
) -> Response
where
    R: GradeRepository + 'static,
    A: AttendanceSource + 'static,
{
    respond(service.gpax(&StudentId(student_id)))
}

pub(crate) async fn transcript_handler<R, A>(
    State(service): State<Arc<GradingService<R, A>>>,
    Path(student_id): Path<String>,
) -> Response
where
    R: GradeRepository + 'static,
    A: AttendanceSource + 'static,
{
    respond(service.transcript(&StudentId(student_id)))
}
