//! Assertion helpers for tests.

use std::path::Path;

use pretty_assertions::assert_eq;
use tonescale::{Channels, Raster, SampleStats};

/// Load a written output, failing with a readable message when it is
/// missing or unreadable.
pub fn load_output(path: &Path) -> Raster {
    assert!(path.is_file(), "expected output at {}", path.display());
    graylift::io::load_capture(path)
        .unwrap_or_else(|e| panic!("output at {} is unreadable: {e}", path.display()))
}

/// Assert a raster has the expected dimensions.
pub fn assert_dims(raster: &Raster, width: u32, height: u32) {
    assert_eq!(
        (raster.width(), raster.height()),
        (width, height),
        "output dimensions"
    );
}

/// Assert a raster is 8-bit single-channel.
pub fn assert_gray8(raster: &Raster) {
    assert_eq!(raster.bit_depth(), 8, "output depth");
    assert_eq!(raster.channels(), Channels::Gray, "output channels");
}

/// Assert a raster is 8-bit three-channel.
pub fn assert_rgb8(raster: &Raster) {
    assert_eq!(raster.bit_depth(), 8, "output depth");
    assert_eq!(raster.channels(), Channels::Rgb, "output channels");
}

/// Assert the samples span the whole 8-bit range.
pub fn assert_full_range(raster: &Raster) {
    let stats = SampleStats::of_raster(raster);
    assert_eq!(stats.min, 0, "darkest output sample");
    assert_eq!(stats.max, 255, "brightest output sample");
}

/// Assert every sample is zero.
pub fn assert_all_black(raster: &Raster) {
    let stats = SampleStats::of_raster(raster);
    assert_eq!(
        (stats.min, stats.max),
        (0, 0),
        "flat captures must come out black"
    );
}

/// The raw 8-bit samples of a raster, failing on a 16-bit one.
pub fn eight_bit_samples(raster: &Raster) -> Vec<u8> {
    match raster {
        Raster::Eight(r) => r.samples().to_vec(),
        Raster::Sixteen(_) => panic!("expected an 8-bit raster"),
    }
}
