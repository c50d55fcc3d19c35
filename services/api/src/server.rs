use crate::cli::ServeArgs;
use crate::infra::{grading_service, AppState, InMemoryGradeRepository};
use crate::routes::with_grading_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lms_grading::config::AppConfig;
use lms_grading::error::AppError;
use lms_grading::grading::ScoreSheetImporter;
use lms_grading::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let repository = match args.score_sheet.take() {
        Some(path) => {
            let sheet = ScoreSheetImporter::from_path(&path)?;
            info!(
                path = %path.display(),
                students = sheet.students.len(),
                records = sheet.records.len(),
                "score sheet loaded"
            );
            InMemoryGradeRepository::from_sheet(sheet)
        }
        None => {
            warn!("no score sheet supplied; serving an empty repository until one is imported");
            InMemoryGradeRepository::default()
        }
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        repository: repository.clone(),
    };

    let service = Arc::new(grading_service(repository, &config.grading));
    info!(
        scale_mode = service.policy().scale.mode.label(),
        "grading policy configured"
    );

    let app = with_grading_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "grading service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
