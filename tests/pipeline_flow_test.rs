//! End-to-end tests for single-capture preparation.

mod common;

use common::{assertions, fixtures};
use graylift::batch;
use graylift::io;
use graylift::models::{JobSettings, OutputFormat};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tonescale::{PrepOptions, ToneCurve};

fn settings_with(options: PrepOptions) -> JobSettings {
    JobSettings {
        options,
        ..JobSettings::default()
    }
}

#[test]
fn test_narrow_range_capture_fills_display_range() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::gray16(
        dir.path(),
        "dim.png",
        vec![20_000, 21_000, 22_000, 23_000],
        2,
        2,
    );
    let output = dir.path().join("processed_dim.png");

    batch::process_file(&input, &output, &JobSettings::default()).unwrap();

    let result = assertions::load_output(&output);
    assertions::assert_gray8(&result);
    assertions::assert_dims(&result, 2, 2);
    assertions::assert_full_range(&result);
}

#[test]
fn test_scale_rounds_output_dimensions() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::gray16(dir.path(), "odd.png", fixtures::ramp16(15, 0, 60_000), 5, 3);
    let output = dir.path().join("out.png");

    let settings = settings_with(PrepOptions::new().scale(0.5));
    batch::process_file(&input, &output, &settings).unwrap();

    // round(5 * 0.5) = 3, round(3 * 0.5) = 2
    assertions::assert_dims(&assertions::load_output(&output), 3, 2);
}

#[test]
fn test_exact_dimensions_are_honored() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::gray16(dir.path(), "grid.png", fixtures::ramp16(16, 0, 65_535), 4, 4);
    let output = dir.path().join("out.png");

    let settings = settings_with(PrepOptions::new().dimensions(7, 3));
    batch::process_file(&input, &output, &settings).unwrap();

    assertions::assert_dims(&assertions::load_output(&output), 7, 3);
}

#[test]
fn test_flat_capture_comes_out_black() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::gray16(dir.path(), "flat.png", vec![40_000; 9], 3, 3);
    let output = dir.path().join("out.png");

    batch::process_file(&input, &output, &JobSettings::default()).unwrap();

    let result = assertions::load_output(&output);
    assertions::assert_dims(&result, 3, 3);
    assertions::assert_all_black(&result);
}

#[test]
fn test_linear_tone_keeps_the_top_byte() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::gray16(dir.path(), "lin.png", vec![0, 256, 32_768, 65_535], 2, 2);
    let output = dir.path().join("out.png");

    let settings = settings_with(PrepOptions::new().tone(ToneCurve::Linear));
    batch::process_file(&input, &output, &settings).unwrap();

    let result = assertions::load_output(&output);
    assert_eq!(assertions::eight_bit_samples(&result), vec![0, 1, 128, 255]);
}

#[test]
fn test_eight_bit_capture_is_stretched_too() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::gray8(dir.path(), "low.png", vec![10, 110, 210], 3, 1);
    let output = dir.path().join("out.png");

    batch::process_file(&input, &output, &JobSettings::default()).unwrap();

    let result = assertions::load_output(&output);
    assert_eq!(assertions::eight_bit_samples(&result), vec![0, 127, 255]);
}

#[test]
fn test_expansion_gives_three_equal_channels() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::gray16(dir.path(), "mono.png", vec![0, 30_000, 60_000, 65_535], 2, 2);
    let output = dir.path().join("out.png");

    let settings = settings_with(PrepOptions::new().expand_rgb(true));
    batch::process_file(&input, &output, &settings).unwrap();

    let result = assertions::load_output(&output);
    assertions::assert_rgb8(&result);
    for px in assertions::eight_bit_samples(&result).chunks_exact(3) {
        assert_eq!(px[0], px[1], "replicated channels must match");
        assert_eq!(px[1], px[2], "replicated channels must match");
    }
}

#[test]
fn test_jpeg_output_is_written_and_readable() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::gray16(dir.path(), "scan.png", fixtures::ramp16(64, 500, 64_000), 8, 8);

    let settings = JobSettings {
        format: OutputFormat::Jpeg,
        jpeg_quality: 85,
        ..JobSettings::default()
    };
    let output = io::output_path(&input, dir.path(), settings.format);
    batch::process_file(&input, &output, &settings).unwrap();

    assert!(output.ends_with("processed_scan.jpg"));
    let result = assertions::load_output(&output);
    assertions::assert_gray8(&result);
    assertions::assert_dims(&result, 8, 8);
}

#[test]
fn test_sixteen_bit_tiff_roundtrip() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::gray16(dir.path(), "scan.tif", fixtures::ramp16(6, 1_000, 2_000), 3, 2);
    let output = dir.path().join("processed_scan.tif");

    batch::process_file(&input, &output, &JobSettings::default()).unwrap();

    let result = assertions::load_output(&output);
    assertions::assert_gray8(&result);
    assertions::assert_full_range(&result);
}

#[test]
fn test_rgb_capture_keeps_color_layout() {
    let dir = TempDir::new().unwrap();
    let samples = vec![
        1_000, 2_000, 3_000, // one dark pixel
        50_000, 60_000, 64_000, // one bright pixel
    ];
    let input = fixtures::rgb16(dir.path(), "color.png", samples, 2, 1);
    let output = dir.path().join("out.png");

    batch::process_file(&input, &output, &JobSettings::default()).unwrap();

    let result = assertions::load_output(&output);
    assertions::assert_rgb8(&result);
    assertions::assert_full_range(&result);
}
