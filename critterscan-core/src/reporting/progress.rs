use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress bar with one unit per sampled second.
///
/// Draws on stderr and stays hidden when stderr is not a terminal.
pub fn sample_progress_bar(total_samples: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_samples);

    let style = ProgressStyle::default_bar()
        .template("Scanning: {percent:>3}% [{bar:30}] {pos}/{len}s ({elapsed_precise} / {eta_precise})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##.");
    pb.set_style(style);

    if !std::io::stderr().is_terminal() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
