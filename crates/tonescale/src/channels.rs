//! Channel layout conversion.
//!
//! Some downstream consumers only accept three-channel input, even for
//! monochrome material. [`expand_to_rgb`] replicates each gray sample into
//! R, G and B, which renders identically while satisfying the layout.

use crate::raster::{Channels, Raster8};

/// Expands a grayscale raster to RGB by replicating each sample.
///
/// Rasters that are already RGB pass through unchanged.
pub fn expand_to_rgb(raster: Raster8) -> Raster8 {
    match raster.channels() {
        Channels::Rgb => raster,
        Channels::Gray => {
            let width = raster.width();
            let height = raster.height();
            let mut samples = Vec::with_capacity(raster.pixel_count() * 3);
            for &s in raster.samples() {
                samples.extend_from_slice(&[s, s, s]);
            }
            Raster8::from_raw(samples, width, height, Channels::Rgb)
        }
    }
}
