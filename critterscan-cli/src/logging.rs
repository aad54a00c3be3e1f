// ============================================================================
// critterscan-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup for the CLI
//
// Diagnostics go through the `log` facade to stderr. The product output
// (banner, detection lines, summary) is written to stdout by the reporter
// and never passes through the logger.
//
// USAGE:
// - default: warnings and errors only
// - RUST_LOG=info: model loading and run timing
// - RUST_LOG=debug: ffprobe/ffmpeg invocations and per-sample decode failures

use std::io::Write;

use env_logger::Env;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Initializes env_logger. Calling it twice is harmless.
pub fn init_logging() {
    let result = env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                get_timestamp(),
                record.level(),
                record.args()
            )
        })
        .try_init();

    if result.is_ok() {
        log::debug!("Logger initialized");
    }
}

/// Returns the current local time formatted as "HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
