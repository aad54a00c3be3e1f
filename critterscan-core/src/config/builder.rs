// ============================================================================
// critterscan-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for ScanConfig
//
// Fluent construction of ScanConfig with defaults for every field and
// validation of the confidence threshold at build time.

use super::ScanConfig;
use crate::error::CoreResult;

/// Builder for creating [`ScanConfig`] instances.
///
/// # Examples
///
/// ```rust
/// use critterscan_core::config::ScanConfigBuilder;
///
/// let config = ScanConfigBuilder::new()
///     .min_confidence(0.75)
///     .quiet(true)
///     .show_progress(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.min_confidence, 0.75);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScanConfigBuilder {
    config: ScanConfig,
}

impl ScanConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum confidence (inclusive).
    pub fn min_confidence(mut self, value: f64) -> Self {
        self.config.min_confidence = value;
        self
    }

    /// Enables or disables quiet mode.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.config.quiet = quiet;
        self
    }

    /// Enables or disables the progress bar.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> CoreResult<ScanConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
