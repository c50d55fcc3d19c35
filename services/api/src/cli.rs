use crate::report::{run_report_card, run_transcript, ReportCardArgs, TranscriptArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lms_grading::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "lms-grading-api",
    about = "Serve or print Thai grade reports computed from CSV score sheets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print a cumulative transcript with GPAX for one student
    Transcript(TranscriptArgs),
    /// Print a single-semester report card for one student
    ReportCard(ReportCardArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Score sheet CSV to load into the in-memory repository at startup
    #[arg(long)]
    pub(crate) score_sheet: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Transcript(args) => run_transcript(args),
        Command::ReportCard(args) => run_report_card(args),
    }
}
