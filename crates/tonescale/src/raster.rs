//! Owned raster buffers at the two sample depths the crate works with.
//!
//! A raster is a row-major, interleaved sample buffer plus the dimensions and
//! channel layout needed to interpret it. [`Raster16`] holds capture-depth
//! data straight from a 16-bit decoder; [`Raster8`] holds display-depth data.
//! Construction validates the buffer shape once, so every later stage can
//! index by `(x, y, channel)` without re-checking lengths.
//!
//! [`Raster`] wraps both depths for code paths that handle either, such as a
//! decoder that does not know the file's depth up front.

use thiserror::Error;

/// Channel layout of a raster's interleaved samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channels {
    /// One sample per pixel.
    Gray,
    /// Three samples per pixel, interleaved R, G, B.
    Rgb,
}

impl Channels {
    /// Samples per pixel for this layout.
    #[inline]
    pub fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }
}

/// Errors raised when a raster's shape does not hold together.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Width or height is zero.
    #[error("raster dimensions must be nonzero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    /// The sample buffer does not contain exactly `width * height * channels`
    /// entries.
    #[error(
        "sample buffer holds {actual} samples, expected {expected} \
         for {width}x{height} with {channels} channel(s)"
    )]
    LengthMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
        channels: usize,
    },
}

fn check_shape(
    len: usize,
    width: u32,
    height: u32,
    channels: Channels,
) -> Result<(), RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::ZeroDimension { width, height });
    }
    let expected = width as usize * height as usize * channels.count();
    if len != expected {
        return Err(RasterError::LengthMismatch {
            actual: len,
            expected,
            width,
            height,
            channels: channels.count(),
        });
    }
    Ok(())
}

/// A display-depth raster: one `u8` per sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster8 {
    samples: Vec<u8>,
    width: u32,
    height: u32,
    channels: Channels,
}

impl Raster8 {
    /// Wraps an interleaved sample buffer, validating its shape.
    pub fn new(
        samples: Vec<u8>,
        width: u32,
        height: u32,
        channels: Channels,
    ) -> Result<Self, RasterError> {
        check_shape(samples.len(), width, height, channels)?;
        Ok(Self {
            samples,
            width,
            height,
            channels,
        })
    }

    /// Builds a raster from parts already known to be consistent.
    ///
    /// Callers inside the crate produce buffers whose length is derived from
    /// the dimensions, so the checked constructor would only re-prove what
    /// the arithmetic already guarantees.
    pub(crate) fn from_raw(
        samples: Vec<u8>,
        width: u32,
        height: u32,
        channels: Channels,
    ) -> Self {
        debug_assert_eq!(
            samples.len(),
            width as usize * height as usize * channels.count(),
            "internal raster construction with mismatched shape"
        );
        Self {
            samples,
            width,
            height,
            channels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Interleaved samples in row-major order.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Consumes the raster and returns the sample buffer.
    #[inline]
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Number of pixels, independent of channel layout.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A capture-depth raster: one `u16` per sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster16 {
    samples: Vec<u16>,
    width: u32,
    height: u32,
    channels: Channels,
}

impl Raster16 {
    /// Wraps an interleaved sample buffer, validating its shape.
    pub fn new(
        samples: Vec<u16>,
        width: u32,
        height: u32,
        channels: Channels,
    ) -> Result<Self, RasterError> {
        check_shape(samples.len(), width, height, channels)?;
        Ok(Self {
            samples,
            width,
            height,
            channels,
        })
    }

    pub(crate) fn from_raw(
        samples: Vec<u16>,
        width: u32,
        height: u32,
        channels: Channels,
    ) -> Self {
        debug_assert_eq!(
            samples.len(),
            width as usize * height as usize * channels.count(),
            "internal raster construction with mismatched shape"
        );
        Self {
            samples,
            width,
            height,
            channels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Interleaved samples in row-major order.
    #[inline]
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// Consumes the raster and returns the sample buffer.
    #[inline]
    pub fn into_samples(self) -> Vec<u16> {
        self.samples
    }

    /// Number of pixels, independent of channel layout.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Widens display-depth samples to capture depth.
///
/// Each sample is multiplied by 257, so 0 stays 0 and 255 becomes 65535.
/// This keeps full white at full scale, which a plain shift would not.
impl From<Raster8> for Raster16 {
    fn from(raster: Raster8) -> Self {
        let width = raster.width;
        let height = raster.height;
        let channels = raster.channels;
        let samples = raster
            .into_samples()
            .into_iter()
            .map(|s| u16::from(s) * 257)
            .collect();
        Raster16::from_raw(samples, width, height, channels)
    }
}

/// A decoded raster at either supported depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raster {
    Eight(Raster8),
    Sixteen(Raster16),
}

impl Raster {
    #[inline]
    pub fn width(&self) -> u32 {
        match self {
            Raster::Eight(r) => r.width(),
            Raster::Sixteen(r) => r.width(),
        }
    }

    #[inline]
    pub fn height(&self) -> u32 {
        match self {
            Raster::Eight(r) => r.height(),
            Raster::Sixteen(r) => r.height(),
        }
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        match self {
            Raster::Eight(r) => r.channels(),
            Raster::Sixteen(r) => r.channels(),
        }
    }

    /// Bits per sample: 8 or 16.
    #[inline]
    pub fn bit_depth(&self) -> u8 {
        match self {
            Raster::Eight(_) => 8,
            Raster::Sixteen(_) => 16,
        }
    }
}

impl From<Raster8> for Raster {
    fn from(raster: Raster8) -> Self {
        Raster::Eight(raster)
    }
}

impl From<Raster16> for Raster {
    fn from(raster: Raster16) -> Self {
        Raster::Sixteen(raster)
    }
}
