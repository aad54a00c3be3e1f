// critterscan-cli/src/main.rs
//
// Entry point for the `critterscan` binary.
//
// Parses the arguments, initializes logging, runs the scan and maps the
// result to the process exit status: 0 when an animal was found, 1 for no
// finding or any error. clap's own usage errors keep clap's status.

use clap::Parser;
use critterscan_cli::error::user_message;
use critterscan_cli::logging::init_logging;
use critterscan_cli::{Cli, run_scan};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();
    log::debug!("Arguments: {cli:?}");

    match run_scan(&cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {}", user_message(&e));
            ExitCode::from(1)
        }
    }
}
