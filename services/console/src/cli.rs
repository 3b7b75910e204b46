use clap::{Parser, Subcommand};
use drillops::config::AppConfig;
use drillops::error::AppError;
use drillops::telemetry;
use tracing::debug;

use crate::demo::{run_board, run_demo, BoardArgs, DemoArgs};

#[derive(Parser, Debug)]
#[command(
    name = "Drilling Operations Console",
    about = "Inspect and demo the service-request board from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the service-request board (default command)
    Board(BoardArgs),
    /// Run an end-to-end demo covering the board, editing, and map lookups
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "console configured");

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Board(BoardArgs::default()));

    match command {
        Command::Board(args) => run_board(&config, args),
        Command::Demo(args) => run_demo(&config, args),
    }
}
