// ============================================================================
// critterscan-core/src/media/ffmpeg_source.rs
// ============================================================================
//
// FFMPEG FRAME SOURCE: Single-frame extraction through ffmpeg-sidecar
//
// Each call to `seek_and_decode` runs one short-lived ffmpeg process that
// seeks to the requested frame, letterboxes it to the detector's square input
// size and writes exactly one RGB24 frame to stdout. The child is always
// waited on before returning, so no process outlives the call.

use std::path::{Path, PathBuf};

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;

use super::{Frame, FrameSource, VideoMetadata, probe_metadata};
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};

/// Padding colour used by YOLO-style letterboxing.
const LETTERBOX_COLOR: &str = "0x727272";

/// Frame source backed by ffprobe (metadata) and ffmpeg (decoding).
#[derive(Debug)]
pub struct FfmpegFrameSource {
    path: PathBuf,
    metadata: VideoMetadata,
    frame_size: u32,
}

impl FfmpegFrameSource {
    /// Opens `path`, reading its metadata. Decoded frames are letterboxed to
    /// `frame_size` x `frame_size`.
    pub fn open(path: &Path, frame_size: u32) -> CoreResult<Self> {
        if !path.is_file() {
            return Err(CoreError::VideoNotFound(path.display().to_string()));
        }
        if frame_size == 0 {
            return Err(CoreError::InvalidConfig(
                "Frame size must be greater than zero".to_string(),
            ));
        }
        let metadata = probe_metadata(path)?;
        log::debug!("Opened {} for sampling", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            metadata,
            frame_size,
        })
    }

    fn build_command(&self, frame_index: u64) -> FfmpegCommand {
        let timestamp = self.metadata.timestamp_of(frame_index);
        let size = self.frame_size;

        let mut cmd = FfmpegCommand::new();
        cmd.hide_banner();
        // Input seek; ffmpeg decodes forward from the preceding keyframe.
        cmd.args(["-ss", &format!("{timestamp:.6}")]);
        cmd.input(self.path.to_string_lossy().as_ref());
        cmd.args([
            "-an",
            "-sn",
            "-vf",
            &letterbox_filter(size),
            "-frames:v",
            "1",
        ]);
        cmd.rawvideo();
        cmd
    }
}

impl FrameSource for FfmpegFrameSource {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn seek_and_decode(&mut self, frame_index: u64) -> CoreResult<Option<Frame>> {
        log::trace!("Decoding frame {} of {}", frame_index, self.path.display());

        let mut cmd = self.build_command(frame_index);
        let mut child = cmd
            .spawn()
            .map_err(|e| command_start_error("ffmpeg (frame extraction)", e))?;

        let mut decoded = None;
        let mut errors = Vec::new();

        let iter = child.iter().map_err(|e| {
            CoreError::Decode(format!("Failed to read ffmpeg output: {e}"))
        });
        match iter {
            Ok(events) => {
                for event in events {
                    match event {
                        FfmpegEvent::OutputFrame(frame) if decoded.is_none() => {
                            decoded = Some(Frame::new(frame.width, frame.height, frame.data));
                        }
                        FfmpegEvent::Error(message) => errors.push(message),
                        _ => {}
                    }
                }
            }
            Err(e) => {
                // Do not leave the child running when its output is unusable.
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        }

        let status = child
            .wait()
            .map_err(|e| CoreError::Decode(format!("Failed to wait for ffmpeg: {e}")))?;

        match decoded {
            Some(frame) => frame.map(Some),
            None if status.success() => Ok(None),
            None => Err(command_failed_error(
                "ffmpeg (frame extraction)",
                status,
                errors.join("\n"),
            )),
        }
    }
}

impl Drop for FfmpegFrameSource {
    fn drop(&mut self) {
        log::debug!("Closed {}", self.path.display());
    }
}

/// Scale-and-pad filter producing a `size` x `size` letterboxed frame.
fn letterbox_filter(size: u32) -> String {
    format!(
        "scale={size}:{size}:force_original_aspect_ratio=decrease,\
         pad={size}:{size}:(ow-iw)/2:(oh-ih)/2:color={LETTERBOX_COLOR}"
    )
}
