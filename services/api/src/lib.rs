mod cli;
mod infra;
mod report;
mod routes;
mod server;

use lms_grading::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
