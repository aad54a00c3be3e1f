//! Command implementations for the CLI.

/// Scans one video and maps the result to an exit status.
pub mod scan;
