mod cli;
mod demo;
mod infra;

use drillops::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
