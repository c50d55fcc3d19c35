use crate::infra::{AppGradingService, AppState, ImportSummary};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use lms_grading::error::AppError;
use lms_grading::grading::{grading_router, GradingServiceError, ScoreSheetImporter};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use tracing::info;

pub(crate) fn with_grading_routes(service: Arc<AppGradingService>) -> axum::Router {
    grading_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/score-sheet",
            axum::routing::put(import_score_sheet_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Replaces the served score sheet with the CSV in the request body.
pub(crate) async fn import_score_sheet_endpoint(
    Extension(state): Extension<AppState>,
    body: String,
) -> Result<Json<ImportSummary>, AppError> {
    let sheet = ScoreSheetImporter::from_reader(Cursor::new(body.into_bytes()))?;
    let summary = ImportSummary::from(&sheet);
    state
        .repository
        .replace(sheet)
        .map_err(GradingServiceError::from)?;

    info!(
        students = summary.students,
        semesters = summary.semesters,
        records = summary.records,
        "score sheet replaced"
    );
    Ok(Json(summary))
}
