//! Reduction from capture depth to display depth.
//!
//! Scientific and scanner captures rarely use their full 16-bit range; a
//! plain byte-drop of such a file comes out nearly black. [`ToneCurve::MinMax`]
//! instead stretches the range that is actually used to full scale, so the
//! darkest sample lands at 0 and the brightest at 255. [`ToneCurve::Linear`]
//! keeps absolute levels for captures that are already well exposed.
//!
//! The stretch is computed in `f32` and truncated to `u8`, not rounded. The
//! brightest sample still maps to exactly 255 because the ratio is exactly
//! 1.0 there.

use crate::raster::{Raster16, Raster8};
use crate::stats::SampleStats;

/// Strategy for mapping samples down to 8 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToneCurve {
    /// Stretch the used range to full scale: `255 * (s - min) / (max - min)`.
    ///
    /// The extremes are global across all channels, so color balance is
    /// preserved. A flat raster has no contrast to stretch and comes out
    /// all-zero instead of dividing by zero.
    #[default]
    MinMax,
    /// Keep levels proportional: 16-bit samples drop their low byte, 8-bit
    /// samples pass through unchanged.
    Linear,
}

/// Maps a capture-depth raster down to display depth.
pub fn tonemap16(raster: Raster16, curve: ToneCurve) -> Raster8 {
    let width = raster.width();
    let height = raster.height();
    let channels = raster.channels();
    let samples = match curve {
        ToneCurve::MinMax => stretch_u16(raster.samples()),
        ToneCurve::Linear => raster
            .into_samples()
            .into_iter()
            .map(|s| (s >> 8) as u8)
            .collect(),
    };
    Raster8::from_raw(samples, width, height, channels)
}

/// Applies a tone curve to a raster that is already at display depth.
///
/// [`ToneCurve::Linear`] is the identity here; [`ToneCurve::MinMax`] still
/// stretches low-contrast input to full scale.
pub fn tonemap8(raster: Raster8, curve: ToneCurve) -> Raster8 {
    match curve {
        ToneCurve::Linear => raster,
        ToneCurve::MinMax => {
            let width = raster.width();
            let height = raster.height();
            let channels = raster.channels();
            let samples = stretch_u8(raster.samples());
            Raster8::from_raw(samples, width, height, channels)
        }
    }
}

fn stretch_u16(samples: &[u16]) -> Vec<u8> {
    let stats = match SampleStats::of_u16(samples) {
        Some(stats) => stats,
        None => return Vec::new(),
    };
    if stats.is_flat() {
        return vec![0; samples.len()];
    }
    let range = f32::from(stats.range());
    samples
        .iter()
        .map(|&s| (255.0 * f32::from(s - stats.min) / range) as u8)
        .collect()
}

fn stretch_u8(samples: &[u8]) -> Vec<u8> {
    let stats = match SampleStats::of_u8(samples) {
        Some(stats) => stats,
        None => return Vec::new(),
    };
    if stats.is_flat() {
        return vec![0; samples.len()];
    }
    let min = stats.min as u8;
    let range = f32::from(stats.range());
    samples
        .iter()
        .map(|&s| (255.0 * f32::from(s - min) / range) as u8)
        .collect()
}
