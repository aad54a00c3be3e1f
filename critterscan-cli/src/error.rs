// ============================================================================
// critterscan-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reuses the core error type. Every error that reaches `main` is
// printed once on stderr and turned into exit status 1.

use critterscan_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Text printed after the `Error: ` prefix for `err`.
///
/// Configuration errors are shown without the variant prefix so that range
/// errors read the same as the usage text.
pub fn user_message(err: &CoreError) -> String {
    match err {
        CoreError::InvalidConfig(msg) => msg.clone(),
        other => other.to_string(),
    }
}
