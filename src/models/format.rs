//! Output format and tone curve as they appear in configs and CLI flags.

use clap::ValueEnum;
use serde::Deserialize;
use tonescale::ToneCurve;

/// Container format for prepared output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Keep the source container and extension
    #[default]
    Keep,
    /// Write PNG regardless of the source container
    Png,
    /// Write TIFF regardless of the source container
    Tiff,
    /// Write JPEG regardless of the source container
    Jpeg,
}

impl OutputFormat {
    /// Extension forced onto output names, or `None` to keep the source's.
    pub fn forced_extension(self) -> Option<&'static str> {
        match self {
            OutputFormat::Keep => None,
            OutputFormat::Png => Some("png"),
            OutputFormat::Tiff => Some("tif"),
            OutputFormat::Jpeg => Some("jpg"),
        }
    }
}

/// Tone curve choice as spelled in configs and on the command line.
///
/// This is the serializable mirror of [`tonescale::ToneCurve`]; the pixel
/// crate stays free of CLI and config dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneCurveChoice {
    /// Stretch the used sample range to full scale
    #[default]
    Minmax,
    /// Keep levels proportional (drop the low byte of 16-bit samples)
    Linear,
}

impl From<ToneCurveChoice> for ToneCurve {
    fn from(choice: ToneCurveChoice) -> Self {
        match choice {
            ToneCurveChoice::Minmax => ToneCurve::MinMax,
            ToneCurveChoice::Linear => ToneCurve::Linear,
        }
    }
}
