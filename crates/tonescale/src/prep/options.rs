//! Preparation options and configuration.
//!
//! This module provides the [`PrepOptions`] struct for configuring how a
//! capture is resized and tone-mapped into a display-ready raster.

use crate::tonemap::ToneCurve;

/// How the resize stage picks its target dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeSpec {
    /// Multiply both axes by a factor and round to the nearest pixel.
    Scale(f32),
    /// Resample to exact dimensions, ignoring the source aspect ratio.
    Exact { width: u32, height: u32 },
}

/// Configuration options for capture preparation.
///
/// `PrepOptions` controls the pipeline applied to a decoded capture: an
/// optional resize, the tone curve used for the depth reduction, and whether
/// grayscale output is expanded to three channels.
///
/// # Defaults
///
/// - Resize: disabled (preserve original dimensions)
/// - Tone curve: [`ToneCurve::MinMax`] (stretch the used range to full scale)
/// - RGB expansion: disabled (grayscale stays single-channel)
///
/// # Example
///
/// ```
/// use tonescale::{PrepOptions, ResizeSpec, ToneCurve};
///
/// // Default options
/// let options = PrepOptions::new();
/// assert!(options.resize.is_none());
///
/// // Customize with the builder pattern
/// let options = PrepOptions::new()
///     .scale(0.5)
///     .tone(ToneCurve::Linear)
///     .expand_rgb(true);
/// assert_eq!(options.resize, Some(ResizeSpec::Scale(0.5)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PrepOptions {
    /// Resize applied before tone mapping (None = keep dimensions).
    pub resize: Option<ResizeSpec>,

    /// Tone curve for the capture-to-display depth reduction.
    pub tone: ToneCurve,

    /// Whether grayscale results are expanded to RGB by sample replication.
    ///
    /// Viewers and downstream pipelines that only accept three-channel
    /// input need this; everything else is better served by the smaller
    /// single-channel file.
    pub expand_rgb: bool,
}

impl Default for PrepOptions {
    fn default() -> Self {
        Self {
            resize: None,
            tone: ToneCurve::MinMax,
            expand_rgb: false,
        }
    }
}

impl PrepOptions {
    /// Create new preparation options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for on-screen review: contrast stretch plus RGB expansion,
    /// so any viewer renders the result without surprises.
    #[inline]
    pub fn display() -> Self {
        Self::new().expand_rgb(true)
    }

    /// Preset for archival output: contrast stretch only, keeping the
    /// channel layout and dimensions of the source.
    #[inline]
    pub fn archive() -> Self {
        Self::new()
    }

    /// Set a uniform scale factor for the resize stage.
    ///
    /// Replaces any previously set exact dimensions; the last resize call
    /// wins.
    #[inline]
    pub fn scale(mut self, factor: f32) -> Self {
        self.resize = Some(ResizeSpec::Scale(factor));
        self
    }

    /// Set exact target dimensions for the resize stage.
    ///
    /// Replaces any previously set scale factor; the last resize call wins.
    #[inline]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.resize = Some(ResizeSpec::Exact { width, height });
        self
    }

    /// Disable the resize stage, preserving the source dimensions.
    #[inline]
    pub fn keep_size(mut self) -> Self {
        self.resize = None;
        self
    }

    /// Set the tone curve for the depth reduction.
    #[inline]
    pub fn tone(mut self, curve: ToneCurve) -> Self {
        self.tone = curve;
        self
    }

    /// Set whether grayscale output is expanded to RGB.
    #[inline]
    pub fn expand_rgb(mut self, enabled: bool) -> Self {
        self.expand_rgb = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = PrepOptions::default();
        assert!(opts.resize.is_none(), "resize should default to disabled");
        assert_eq!(
            opts.tone,
            ToneCurve::MinMax,
            "tone curve should default to the contrast stretch"
        );
        assert!(!opts.expand_rgb, "expand_rgb should default to false");
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(PrepOptions::new(), PrepOptions::default());
    }

    #[test]
    fn test_scale_replaces_dimensions() {
        let opts = PrepOptions::new().dimensions(800, 600).scale(0.5);
        assert_eq!(opts.resize, Some(ResizeSpec::Scale(0.5)));
    }

    #[test]
    fn test_dimensions_replace_scale() {
        let opts = PrepOptions::new().scale(2.0).dimensions(640, 480);
        assert_eq!(
            opts.resize,
            Some(ResizeSpec::Exact {
                width: 640,
                height: 480
            })
        );
    }

    #[test]
    fn test_keep_size_clears_resize() {
        let opts = PrepOptions::new().scale(2.0).keep_size();
        assert!(opts.resize.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let opts = PrepOptions::new()
            .dimensions(1024, 768)
            .tone(ToneCurve::Linear)
            .expand_rgb(true);
        assert_eq!(
            opts.resize,
            Some(ResizeSpec::Exact {
                width: 1024,
                height: 768
            })
        );
        assert_eq!(opts.tone, ToneCurve::Linear);
        assert!(opts.expand_rgb);
    }

    #[test]
    fn test_display_preset_expands_rgb() {
        let opts = PrepOptions::display();
        assert!(opts.expand_rgb);
        assert_eq!(opts.tone, ToneCurve::MinMax);
        assert!(opts.resize.is_none());
    }

    #[test]
    fn test_archive_preset_keeps_layout() {
        let opts = PrepOptions::archive();
        assert!(!opts.expand_rgb);
        assert_eq!(opts.tone, ToneCurve::MinMax);
    }
}
