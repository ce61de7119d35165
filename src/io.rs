//! Decoding captures from disk and encoding prepared results.
//!
//! Decoding goes through the `image` crate and lands in [`tonescale`]
//! rasters at the source's own depth: 16-bit files stay 16-bit until the
//! pipeline reduces them. Alpha channels are dropped on load; transparency
//! has no meaning for the capture sources this tool processes, and carrying
//! it through the pipeline would only complicate the pixel math.
//!
//! Output names follow the `processed_<filename>` convention. A forced
//! output format rewrites the extension; otherwise the source's is kept and
//! the encoder is chosen from it.

use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use tonescale::{Channels, Raster, Raster16, Raster8};

use crate::error::PrepError;
use crate::models::format::OutputFormat;

/// File extensions the batch runner picks up, compared case-insensitively.
pub const CAPTURE_EXTENSIONS: &[&str] = &["png", "tif", "tiff", "jpg", "jpeg"];

/// Prefix given to every output file name.
pub const OUTPUT_PREFIX: &str = "processed_";

/// Decodes a capture file into a raster at its native depth.
pub fn load_capture(path: &Path) -> Result<Raster, PrepError> {
    let img = image::open(path).map_err(|source| PrepError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    raster_from_dynamic(img, path)
}

/// Encodes a prepared raster to `path`, picking the encoder from the
/// extension. JPEG output honors `jpeg_quality`; other formats ignore it.
pub fn save_display(
    raster: &Raster8,
    path: &Path,
    jpeg_quality: u8,
) -> Result<(), PrepError> {
    let color = match raster.channels() {
        Channels::Gray => ExtendedColorType::L8,
        Channels::Rgb => ExtendedColorType::Rgb8,
    };
    if has_jpeg_extension(path) {
        let file = File::create(path).map_err(|source| PrepError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        let encoder =
            JpegEncoder::new_with_quality(BufWriter::new(file), jpeg_quality.clamp(1, 100));
        encoder
            .write_image(raster.samples(), raster.width(), raster.height(), color)
            .map_err(|source| PrepError::Encode {
                path: path.to_path_buf(),
                source,
            })
    } else {
        image::save_buffer(path, raster.samples(), raster.width(), raster.height(), color)
            .map_err(|source| PrepError::Encode {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// True when the path has an extension the batch runner processes.
pub fn is_capture_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            CAPTURE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Output file name for an input: `processed_<filename>`, with the
/// extension rewritten when the format forces one.
pub fn output_file_name(input: &Path, format: OutputFormat) -> OsString {
    let mut name = OsString::from(OUTPUT_PREFIX);
    match format.forced_extension() {
        None => name.push(input.file_name().unwrap_or_default()),
        Some(ext) => {
            name.push(input.file_stem().unwrap_or_default());
            name.push(".");
            name.push(ext);
        }
    }
    name
}

/// Full output path for an input file landing in `output_dir`.
pub fn output_path(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    output_dir.join(output_file_name(input, format))
}

fn has_jpeg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg")
        })
}

fn raster_from_dynamic(img: DynamicImage, path: &Path) -> Result<Raster, PrepError> {
    let (width, height) = (img.width(), img.height());
    let shape_err = |source| PrepError::InvalidShape {
        path: path.to_path_buf(),
        source,
    };
    let raster: Raster = match img {
        DynamicImage::ImageLuma8(buf) => {
            Raster8::new(buf.into_raw(), width, height, Channels::Gray)
                .map_err(shape_err)?
                .into()
        }
        DynamicImage::ImageRgb8(buf) => {
            Raster8::new(buf.into_raw(), width, height, Channels::Rgb)
                .map_err(shape_err)?
                .into()
        }
        DynamicImage::ImageLumaA8(buf) => {
            tracing::debug!(path = %path.display(), "Dropping alpha channel");
            let raw = buf.into_raw();
            let samples: Vec<u8> = raw.chunks_exact(2).map(|px| px[0]).collect();
            Raster8::new(samples, width, height, Channels::Gray)
                .map_err(shape_err)?
                .into()
        }
        DynamicImage::ImageRgba8(buf) => {
            tracing::debug!(path = %path.display(), "Dropping alpha channel");
            let raw = buf.into_raw();
            let samples: Vec<u8> = raw
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            Raster8::new(samples, width, height, Channels::Rgb)
                .map_err(shape_err)?
                .into()
        }
        DynamicImage::ImageLuma16(buf) => {
            Raster16::new(buf.into_raw(), width, height, Channels::Gray)
                .map_err(shape_err)?
                .into()
        }
        DynamicImage::ImageRgb16(buf) => {
            Raster16::new(buf.into_raw(), width, height, Channels::Rgb)
                .map_err(shape_err)?
                .into()
        }
        DynamicImage::ImageLumaA16(buf) => {
            tracing::debug!(path = %path.display(), "Dropping alpha channel");
            let raw = buf.into_raw();
            let samples: Vec<u16> = raw.chunks_exact(2).map(|px| px[0]).collect();
            Raster16::new(samples, width, height, Channels::Gray)
                .map_err(shape_err)?
                .into()
        }
        DynamicImage::ImageRgba16(buf) => {
            tracing::debug!(path = %path.display(), "Dropping alpha channel");
            let raw = buf.into_raw();
            let samples: Vec<u16> = raw
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            Raster16::new(samples, width, height, Channels::Rgb)
                .map_err(shape_err)?
                .into()
        }
        other => {
            return Err(PrepError::UnsupportedLayout {
                path: path.to_path_buf(),
                layout: format!("{:?}", other.color()),
            })
        }
    };
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, LumaA, Rgb, Rgba};

    #[test]
    fn test_luma8_decodes_to_gray_raster() {
        let buf = GrayImage::from_raw(2, 1, vec![10, 250]).unwrap();
        let raster =
            raster_from_dynamic(DynamicImage::ImageLuma8(buf), Path::new("a.png")).unwrap();
        assert_eq!(raster.bit_depth(), 8);
        assert_eq!(raster.channels(), Channels::Gray);
        assert_eq!((raster.width(), raster.height()), (2, 1));
    }

    #[test]
    fn test_luma16_keeps_capture_depth() {
        let buf: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_raw(2, 1, vec![1_000, 60_000]).unwrap();
        let raster =
            raster_from_dynamic(DynamicImage::ImageLuma16(buf), Path::new("a.tif")).unwrap();
        assert_eq!(raster.bit_depth(), 16);
        match raster {
            Raster::Sixteen(r) => assert_eq!(r.samples(), &[1_000, 60_000]),
            Raster::Eight(_) => panic!("16-bit input must not be narrowed on load"),
        }
    }

    #[test]
    fn test_alpha_is_dropped_on_load() {
        let buf: ImageBuffer<LumaA<u8>, Vec<u8>> =
            ImageBuffer::from_raw(2, 1, vec![10, 255, 20, 0]).unwrap();
        let raster =
            raster_from_dynamic(DynamicImage::ImageLumaA8(buf), Path::new("a.png")).unwrap();
        match raster {
            Raster::Eight(r) => {
                assert_eq!(r.channels(), Channels::Gray);
                assert_eq!(r.samples(), &[10, 20], "alpha bytes must not survive");
            }
            Raster::Sixteen(_) => panic!("8-bit input must stay 8-bit"),
        }
    }

    #[test]
    fn test_rgba16_drops_alpha_and_keeps_color() {
        let buf: ImageBuffer<Rgba<u16>, Vec<u16>> =
            ImageBuffer::from_raw(1, 1, vec![1, 2, 3, 65_535]).unwrap();
        let raster =
            raster_from_dynamic(DynamicImage::ImageRgba16(buf), Path::new("a.png")).unwrap();
        match raster {
            Raster::Sixteen(r) => {
                assert_eq!(r.channels(), Channels::Rgb);
                assert_eq!(r.samples(), &[1, 2, 3]);
            }
            Raster::Eight(_) => panic!("16-bit input must stay 16-bit"),
        }
    }

    #[test]
    fn test_float_layout_is_rejected() {
        let buf: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::from_raw(1, 1, vec![0.0, 0.5, 1.0]).unwrap();
        let err = raster_from_dynamic(DynamicImage::ImageRgb32F(buf), Path::new("f.tif"))
            .unwrap_err();
        assert!(matches!(err, PrepError::UnsupportedLayout { .. }));
    }

    #[test]
    fn test_capture_extension_filter() {
        assert!(is_capture_file(Path::new("scan.png")));
        assert!(is_capture_file(Path::new("scan.TIF")));
        assert!(is_capture_file(Path::new("scan.JPeG")));
        assert!(!is_capture_file(Path::new("scan.bmp")));
        assert!(!is_capture_file(Path::new("notes.txt")));
        assert!(!is_capture_file(Path::new("no_extension")));
    }

    #[test]
    fn test_output_name_keeps_source_extension() {
        assert_eq!(
            output_file_name(Path::new("/data/scan.tif"), OutputFormat::Keep),
            OsString::from("processed_scan.tif")
        );
    }

    #[test]
    fn test_output_name_rewrites_forced_extension() {
        assert_eq!(
            output_file_name(Path::new("/data/scan.tif"), OutputFormat::Png),
            OsString::from("processed_scan.png")
        );
        assert_eq!(
            output_file_name(Path::new("scan.png"), OutputFormat::Jpeg),
            OsString::from("processed_scan.jpg")
        );
    }

    #[test]
    fn test_output_path_joins_folder() {
        assert_eq!(
            output_path(
                Path::new("/in/scan.png"),
                Path::new("/out"),
                OutputFormat::Keep
            ),
            PathBuf::from("/out/processed_scan.png")
        );
    }
}
