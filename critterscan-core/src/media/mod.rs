//! Video access: metadata, decoded frames and the frame source seam.
//!
//! The sampler only talks to the [`FrameSource`] trait. The production
//! implementation ([`FfmpegFrameSource`]) probes the container with ffprobe
//! and extracts single frames through ffmpeg; tests substitute an in-memory
//! source.

mod ffmpeg_source;
mod probe;

pub use ffmpeg_source::FfmpegFrameSource;
pub use probe::{parse_frame_rate, probe_metadata};

use crate::error::{CoreError, CoreResult};

/// Frame rate, frame count and derived whole-second duration of a video.
///
/// Read once when the video is opened and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    frame_rate: f64,
    total_frames: u64,
    duration_seconds: u64,
}

impl VideoMetadata {
    /// Creates metadata, deriving `duration_seconds = floor(total_frames / frame_rate)`.
    ///
    /// Fails when the frame rate is not a positive finite number, since such
    /// a video cannot be mapped from seconds to frames.
    pub fn new(frame_rate: f64, total_frames: u64) -> CoreResult<Self> {
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(CoreError::VideoInfoError(format!(
                "Invalid frame rate: {frame_rate}"
            )));
        }
        let duration_seconds = (total_frames as f64 / frame_rate).floor() as u64;
        Ok(Self {
            frame_rate,
            total_frames,
            duration_seconds,
        })
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    /// Frame index sampled for `second`: `floor(second * frame_rate)`.
    pub fn frame_position(&self, second: u64) -> u64 {
        (second as f64 * self.frame_rate).floor() as u64
    }

    /// Presentation time of `frame_index` in seconds.
    pub fn timestamp_of(&self, frame_index: u64) -> f64 {
        frame_index as f64 / self.frame_rate
    }
}

/// A decoded RGB24 frame, row-major with no padding.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> CoreResult<Self> {
        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(CoreError::Decode(format!(
                "expected {expected} RGB bytes for {width}x{height}, received {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

// Raw pixels are never logged.
impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Random-access reader over one opened video.
///
/// The source is owned exclusively by the sampler and is released when
/// dropped.
pub trait FrameSource {
    /// Metadata read when the source was opened.
    fn metadata(&self) -> &VideoMetadata;

    /// Seeks to `frame_index` and decodes that frame.
    ///
    /// `Ok(None)` means the decoder produced no frame at that position.
    fn seek_and_decode(&mut self, frame_index: u64) -> CoreResult<Option<Frame>>;
}
