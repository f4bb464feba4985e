use crate::demo::{run_demo, run_rank, run_rank_csv, DemoArgs, RankArgs, RankCsvArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tutor_rank::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Tutor Ranking Service",
    about = "Score tutors against the marketplace ranking rubric and serve the admin API",
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
    /// Score a single tutor signal set stored as JSON
    Rank(RankArgs),
    /// Score every tutor in a signal CSV export and print the leaderboard
    RankCsv(RankCsvArgs),
    /// Walk through registration, recalculation, and the leaderboard with sample tutors
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Preload tutors from a signal CSV export before accepting requests
    #[arg(long)]
    pub(crate) seed_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::RankCsv(args) => run_rank_csv(args),
        Command::Demo(args) => run_demo(args),
    }
}
