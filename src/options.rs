//! Extraction options and configuration.

use std::path::PathBuf;

/// Options controlling outline extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Top margin band as a fraction of page height; spans starting inside
    /// it are header candidates
    pub top_band: f32,

    /// Bottom margin band as a fraction of page height
    pub bottom_band: f32,

    /// Minimum fraction of pages a margin string must repeat on to be
    /// treated as a running header/footer
    pub repeat_ratio: f32,

    /// Tolerance (fraction of page width) for classifying a span as
    /// horizontally centered
    pub center_tolerance: f32,

    /// Minimum text length for a heading candidate
    pub min_heading_chars: usize,

    /// Maximum text length for a heading candidate
    pub max_heading_chars: usize,

    /// Suppress outlines that look like form/table label grids
    pub suppress_form_outlines: bool,

    /// Path to a pre-trained classifier artifact; the rule-based path is
    /// used when absent
    pub model_path: Option<PathBuf>,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the top margin band fraction.
    pub fn with_top_band(mut self, fraction: f32) -> Self {
        self.top_band = fraction;
        self
    }

    /// Set the bottom margin band fraction.
    pub fn with_bottom_band(mut self, fraction: f32) -> Self {
        self.bottom_band = fraction;
        self
    }

    /// Set the header/footer repetition threshold.
    pub fn with_repeat_ratio(mut self, ratio: f32) -> Self {
        self.repeat_ratio = ratio;
        self
    }

    /// Set the centered-alignment tolerance.
    pub fn with_center_tolerance(mut self, fraction: f32) -> Self {
        self.center_tolerance = fraction;
        self
    }

    /// Set the heading candidate length bounds.
    pub fn with_heading_length(mut self, min: usize, max: usize) -> Self {
        self.min_heading_chars = min;
        self.max_heading_chars = max;
        self
    }

    /// Enable or disable form/table outline suppression.
    pub fn with_form_suppression(mut self, enabled: bool) -> Self {
        self.suppress_form_outlines = enabled;
        self
    }

    /// Use a pre-trained classifier artifact.
    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            top_band: 0.12,
            bottom_band: 0.12,
            repeat_ratio: 0.5,
            center_tolerance: 0.10,
            min_heading_chars: 3,
            max_heading_chars: 150,
            suppress_form_outlines: true,
            model_path: None,
        }
    }
}
