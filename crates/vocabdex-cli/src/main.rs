use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use crate::cli::Cli;

const LOG_ENV: &str = "VOCABDEX_LOG";

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let operation = cli.command.operation();
    let target = cli.command.target();
    match commands::run_from_root(&cli.root, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::report_failure(operation, target, &err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber installed by a test harness is not an error.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
