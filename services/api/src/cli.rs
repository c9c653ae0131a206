use crate::demo::{run_analytics, run_estimate, AnalyticsArgs, EstimateArgs};
use crate::server;
use africar::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "AfriCar Price Estimator",
    about = "Estimate used-car prices and explore market analytics from the command line",
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
    /// Price a single vehicle and print the estimate with its charts
    Estimate(EstimateArgs),
    /// Print the market charts that do not depend on a submission
    Analytics(AnalyticsArgs),
}

/// Overrides for where the valuation context is loaded from.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct SourceArgs {
    /// Reference dataset CSV (overrides APP_DATASET_PATH)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Serialized pricing pipeline (overrides APP_MODEL_PATH)
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Reject out-of-range values and unknown levels before pricing
    #[arg(long)]
    pub(crate) strict: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Analytics(args) => run_analytics(args),
    }
}
