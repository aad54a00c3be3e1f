// ============================================================================
// critterscan-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Types
//
// This module defines the error type shared by every component of the core
// library, together with a `CoreResult` alias and helpers for building
// errors around external commands (ffmpeg, ffprobe).
//
// Only input-level failures surface as `CoreError` to callers. Per-frame
// problems (a frame that fails to decode, a detector call that fails) are
// recovered inside the sampler and never abort a run.

use std::process::ExitStatus;

use thiserror::Error;

/// Errors produced by the core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Video file not found: {0}")]
    VideoNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, std::io::Error),

    #[error("{0} exited with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("ffprobe output could not be interpreted: {0}")]
    FfprobeParse(String),

    #[error("Video metadata error: {0}")]
    VideoInfoError(String),

    #[error("Frame decode failed: {0}")]
    Decode(String),

    #[error("Detector error: {0}")]
    Detector(String),
}

/// Result alias used throughout the core library.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for a command that could not be spawned.
pub fn command_start_error(command: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), err)
}

/// Builds a [`CoreError::CommandFailed`] for a command that ran but failed.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(command.into(), status, stderr.into())
}
