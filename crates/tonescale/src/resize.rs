//! Cubic convolution resampling.
//!
//! Resizing runs before tone mapping so the interpolator sees the capture's
//! full precision. The resampler is separable: a horizontal pass produces an
//! intermediate plane, a vertical pass finishes it, and both use the same
//! four-tap cubic convolution kernel (Keys, with sharpness `a = -0.75`).
//!
//! Sample positions map between grids through pixel centers, so target pixel
//! `d` reads from source position `(d + 0.5) * src / dst - 0.5`. Taps that
//! fall outside the source clamp to the nearest edge sample. Accumulation is
//! in `f32`; the kernel's negative lobes can overshoot the sample range, so
//! results are rounded and then clamped back into it.

use thiserror::Error;

use crate::raster::{Channels, Raster16, Raster8};

/// Sharpness constant of the cubic kernel. `-0.75` keeps edges crisp at the
/// cost of mild ringing, the usual trade for photographic downscaling.
const KERNEL_A: f32 = -0.75;

/// Errors raised when a resize target is unusable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResizeError {
    /// The scale factor is zero, negative, infinite or NaN.
    #[error("scale factor must be positive and finite, got {0}")]
    InvalidScale(f32),

    /// The target has no pixels, either because a dimension was given as
    /// zero or because a small scale factor rounded one down to zero.
    #[error("target dimensions {width}x{height} contain no pixels")]
    EmptyTarget { width: u32, height: u32 },

    /// The target's sample buffer would not be addressable.
    #[error("target dimensions {width}x{height} exceed the addressable sample range")]
    TargetTooLarge { width: u64, height: u64 },
}

/// Computes the target dimensions for a uniform scale factor.
///
/// Each axis is multiplied by `scale` and rounded to the nearest integer,
/// half away from zero. Scales small enough to round an axis down to zero
/// are rejected rather than silently producing an empty raster.
pub fn scaled_dimensions(
    width: u32,
    height: u32,
    scale: f32,
) -> Result<(u32, u32), ResizeError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ResizeError::InvalidScale(scale));
    }
    let w = (f64::from(width) * f64::from(scale)).round();
    let h = (f64::from(height) * f64::from(scale)).round();
    if w > f64::from(u32::MAX) || h > f64::from(u32::MAX) {
        return Err(ResizeError::TargetTooLarge {
            width: w as u64,
            height: h as u64,
        });
    }
    let (w, h) = (w as u32, h as u32);
    if w == 0 || h == 0 {
        return Err(ResizeError::EmptyTarget {
            width: w,
            height: h,
        });
    }
    Ok((w, h))
}

/// Resamples a capture-depth raster to exact target dimensions.
pub fn resize16(
    src: &Raster16,
    width: u32,
    height: u32,
) -> Result<Raster16, ResizeError> {
    validate_target(width, height, src.channels())?;
    let plane: Vec<f32> = src.samples().iter().map(|&s| f32::from(s)).collect();
    let resampled = resample_plane(
        &plane,
        src.width() as usize,
        src.height() as usize,
        src.channels().count(),
        width as usize,
        height as usize,
    );
    let samples = resampled
        .into_iter()
        .map(|v| v.round().clamp(0.0, 65_535.0) as u16)
        .collect();
    Ok(Raster16::from_raw(samples, width, height, src.channels()))
}

/// Resamples a display-depth raster to exact target dimensions.
pub fn resize8(
    src: &Raster8,
    width: u32,
    height: u32,
) -> Result<Raster8, ResizeError> {
    validate_target(width, height, src.channels())?;
    let plane: Vec<f32> = src.samples().iter().map(|&s| f32::from(s)).collect();
    let resampled = resample_plane(
        &plane,
        src.width() as usize,
        src.height() as usize,
        src.channels().count(),
        width as usize,
        height as usize,
    );
    let samples = resampled
        .into_iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    Ok(Raster8::from_raw(samples, width, height, src.channels()))
}

fn validate_target(
    width: u32,
    height: u32,
    channels: Channels,
) -> Result<(), ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::EmptyTarget { width, height });
    }
    let samples = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|px| px.checked_mul(channels.count() as u64))
        .and_then(|n| usize::try_from(n).ok());
    if samples.is_none() {
        return Err(ResizeError::TargetTooLarge {
            width: u64::from(width),
            height: u64::from(height),
        });
    }
    Ok(())
}

/// The Keys cubic convolution kernel, evaluated at distance `t >= 0`.
///
/// Within one sample it interpolates (weight 1 at t = 0, weight 0 at t = 1);
/// between one and two samples it contributes the negative lobe that gives
/// cubic resampling its sharpness. Beyond two samples it is zero.
fn kernel(t: f32) -> f32 {
    if t <= 1.0 {
        ((KERNEL_A + 2.0) * t - (KERNEL_A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        (((t - 5.0) * t + 8.0) * t - 4.0) * KERNEL_A
    } else {
        0.0
    }
}

/// Per-target-coordinate source taps and weights along one axis.
struct AxisTaps {
    offsets: Vec<[usize; 4]>,
    weights: Vec<[f32; 4]>,
}

fn axis_taps(src_len: usize, dst_len: usize) -> AxisTaps {
    let ratio = src_len as f64 / dst_len as f64;
    let mut offsets = Vec::with_capacity(dst_len);
    let mut weights = Vec::with_capacity(dst_len);
    for d in 0..dst_len {
        // Map the center of target pixel d into source coordinates.
        let sx = (d as f64 + 0.5) * ratio - 0.5;
        let base = sx.floor();
        let frac = (sx - base) as f32;
        let base = base as i64;
        let mut taps = [0usize; 4];
        for (i, tap) in taps.iter_mut().enumerate() {
            let pos = base - 1 + i as i64;
            *tap = pos.clamp(0, src_len as i64 - 1) as usize;
        }
        offsets.push(taps);
        weights.push([
            kernel(1.0 + frac),
            kernel(frac),
            kernel(1.0 - frac),
            kernel(2.0 - frac),
        ]);
    }
    AxisTaps { offsets, weights }
}

/// Runs both resampling passes over an interleaved `f32` plane.
///
/// The intermediate plane after the horizontal pass is `src_h` rows of
/// `dst_w` pixels and stays unclamped so overshoot from the first pass does
/// not distort the second.
fn resample_plane(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    spp: usize,
    dst_w: usize,
    dst_h: usize,
) -> Vec<f32> {
    debug_assert_eq!(src.len(), src_w * src_h * spp);

    let horizontal = axis_taps(src_w, dst_w);
    let mut mid = vec![0.0f32; src_h * dst_w * spp];
    for y in 0..src_h {
        let row = &src[y * src_w * spp..][..src_w * spp];
        let out = &mut mid[y * dst_w * spp..][..dst_w * spp];
        for x in 0..dst_w {
            let taps = horizontal.offsets[x];
            let w = horizontal.weights[x];
            for c in 0..spp {
                out[x * spp + c] = w[0] * row[taps[0] * spp + c]
                    + w[1] * row[taps[1] * spp + c]
                    + w[2] * row[taps[2] * spp + c]
                    + w[3] * row[taps[3] * spp + c];
            }
        }
    }

    let vertical = axis_taps(src_h, dst_h);
    let row_len = dst_w * spp;
    let mut dst = vec![0.0f32; dst_h * row_len];
    for y in 0..dst_h {
        let taps = vertical.offsets[y];
        let w = vertical.weights[y];
        let rows = [
            &mid[taps[0] * row_len..][..row_len],
            &mid[taps[1] * row_len..][..row_len],
            &mid[taps[2] * row_len..][..row_len],
            &mid[taps[3] * row_len..][..row_len],
        ];
        let out = &mut dst[y * row_len..][..row_len];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = w[0] * rows[0][i]
                + w[1] * rows[1][i]
                + w[2] * rows[2][i]
                + w[3] * rows[3][i];
        }
    }
    dst
}
