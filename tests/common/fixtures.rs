//! Capture fixtures, written with the same codecs the tool reads.

use std::path::{Path, PathBuf};

use image::{ImageBuffer, Luma, Rgb};

/// Write a 16-bit grayscale capture. The container comes from the file
/// extension (.png or .tif).
pub fn gray16(dir: &Path, name: &str, samples: Vec<u16>, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let buf: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(width, height, samples).expect("fixture samples match dimensions");
    buf.save(&path).expect("write fixture");
    path
}

/// Write an 8-bit grayscale capture.
pub fn gray8(dir: &Path, name: &str, samples: Vec<u8>, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let buf: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, samples).expect("fixture samples match dimensions");
    buf.save(&path).expect("write fixture");
    path
}

/// Write a 16-bit RGB capture.
pub fn rgb16(dir: &Path, name: &str, samples: Vec<u16>, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let buf: ImageBuffer<Rgb<u16>, Vec<u16>> =
        ImageBuffer::from_raw(width, height, samples).expect("fixture samples match dimensions");
    buf.save(&path).expect("write fixture");
    path
}

/// Write a file with a capture extension that no decoder accepts.
pub fn junk(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"not an image at all").expect("write fixture");
    path
}

/// Evenly spaced 16-bit samples from `lo` to `hi` inclusive.
pub fn ramp16(len: usize, lo: u16, hi: u16) -> Vec<u16> {
    assert!(len >= 2, "a ramp needs at least two samples");
    let span = f64::from(hi - lo);
    (0..len)
        .map(|i| lo + (span * i as f64 / (len - 1) as f64).round() as u16)
        .collect()
}
