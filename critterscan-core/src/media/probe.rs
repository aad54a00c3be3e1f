//! FFprobe integration for reading video metadata.
//!
//! Extracts the frame rate and frame count of the first video stream and
//! turns them into a [`VideoMetadata`].

use std::path::Path;

use ffprobe::{FfProbeError, ffprobe};

use super::VideoMetadata;
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};

/// Probes `input_path` and returns the metadata of its first video stream.
pub fn probe_metadata(input_path: &Path) -> CoreResult<VideoMetadata> {
    log::debug!(
        "Running ffprobe (via crate) for video metadata on: {}",
        input_path.display()
    );
    let probe = ffprobe(input_path).map_err(|err| {
        log::error!(
            "ffprobe failed for video metadata on {}: {:?}",
            input_path.display(),
            err
        );
        map_ffprobe_error(err)
    })?;

    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            CoreError::VideoInfoError(format!(
                "No video stream found in {}",
                input_path.display()
            ))
        })?;

    let frame_rate = parse_frame_rate(&video_stream.avg_frame_rate)
        .or_else(|| parse_frame_rate(&video_stream.r_frame_rate))
        .ok_or_else(|| {
            CoreError::FfprobeParse(format!(
                "No usable frame rate for {} (avg_frame_rate={}, r_frame_rate={})",
                input_path.display(),
                video_stream.avg_frame_rate,
                video_stream.r_frame_rate
            ))
        })?;

    let duration = video_stream
        .duration
        .as_deref()
        .or(probe.format.duration.as_deref())
        .and_then(|d| d.trim().parse::<f64>().ok());

    let total_frames = resolve_total_frames(video_stream.nb_frames.as_deref(), duration, frame_rate)
        .ok_or_else(|| {
            CoreError::FfprobeParse(format!(
                "Neither a frame count nor a duration is recorded for {}",
                input_path.display()
            ))
        })?;

    log::debug!(
        "Probed {}: {} fps, {} frames",
        input_path.display(),
        frame_rate,
        total_frames
    );

    VideoMetadata::new(frame_rate, total_frames)
}

/// Parses an ffprobe rate such as `"30000/1001"` or `"25"`.
///
/// Returns `None` for `"0/0"`, zero, negative or malformed rates.
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let rate = rate.trim();
    let value = match rate.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<f64>().ok()?;
            let den = den.trim().parse::<f64>().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.parse::<f64>().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Uses `nb_frames` when the container records it, else `round(duration * fps)`.
fn resolve_total_frames(nb_frames: Option<&str>, duration: Option<f64>, frame_rate: f64) -> Option<u64> {
    if let Some(count) = nb_frames.and_then(|n| n.trim().parse::<u64>().ok()) {
        if count > 0 {
            return Some(count);
        }
    }
    duration
        .filter(|d| d.is_finite() && *d >= 0.0)
        .map(|d| (d * frame_rate).round() as u64)
}

fn map_ffprobe_error(err: FfProbeError) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error("ffprobe (video metadata)", io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error("ffprobe (video metadata)", output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::FfprobeParse(format!("ffprobe output deserialization: {err}"))
        }
        #[allow(unreachable_patterns)]
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error: {err:?}")),
    }
}
