//! Sampling pipeline: which frames to examine, how each frame is judged and
//! how accepted frames are accumulated across the run.

pub mod aggregate;
pub mod filter;
pub mod sampler;

pub use aggregate::{AcceptedDetection, RunAccumulator, RunSummary};
pub use filter::{FrameOutcome, Verdict, classify_detections};
pub use sampler::{SampleIndex, run_sampler, sample_schedule, total_progress_units};
