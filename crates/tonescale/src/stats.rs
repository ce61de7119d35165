//! Aggregate statistics over raster samples.
//!
//! [`ToneCurve::MinMax`](crate::tonemap::ToneCurve) needs the global extremes
//! of a raster before it can stretch them to full scale, and the CLI surfaces
//! the same numbers when inspecting a capture. Statistics are computed across
//! all channels together; a color raster gets one `min`/`max` pair, not three.

use crate::raster::Raster;

/// Minimum, maximum and mean of a sample buffer.
///
/// `min` and `max` are in the source depth's range; for 8-bit input they
/// simply never exceed 255. The mean is accumulated in `f64`, which is exact
/// for sums of 16-bit samples well past any raster size this crate meets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub min: u16,
    pub max: u16,
    pub mean: f64,
}

impl SampleStats {
    /// Computes statistics over 16-bit samples.
    ///
    /// Returns `None` for an empty slice: there is no meaningful minimum of
    /// nothing, and callers that forward decoder output never hit this case
    /// because rasters cannot be empty.
    pub fn of_u16(samples: &[u16]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut min = u16::MAX;
        let mut max = u16::MIN;
        let mut sum = 0.0f64;
        for &s in samples {
            min = min.min(s);
            max = max.max(s);
            sum += f64::from(s);
        }
        Some(Self {
            min,
            max,
            mean: sum / samples.len() as f64,
        })
    }

    /// Computes statistics over 8-bit samples.
    pub fn of_u8(samples: &[u8]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut min = u8::MAX;
        let mut max = u8::MIN;
        let mut sum = 0.0f64;
        for &s in samples {
            min = min.min(s);
            max = max.max(s);
            sum += f64::from(s);
        }
        Some(Self {
            min: u16::from(min),
            max: u16::from(max),
            mean: sum / samples.len() as f64,
        })
    }

    /// Computes statistics over a raster at either depth.
    ///
    /// Rasters are never empty, so unlike the slice constructors this cannot
    /// fail.
    pub fn of_raster(raster: &Raster) -> Self {
        let stats = match raster {
            Raster::Eight(r) => Self::of_u8(r.samples()),
            Raster::Sixteen(r) => Self::of_u16(r.samples()),
        };
        debug_assert!(stats.is_some(), "rasters hold at least one sample");
        stats.unwrap_or(Self {
            min: 0,
            max: 0,
            mean: 0.0,
        })
    }

    /// Width of the used sample range, `max - min`.
    #[inline]
    pub fn range(&self) -> u16 {
        self.max - self.min
    }

    /// True when every sample carries the same value.
    #[inline]
    pub fn is_flat(&self) -> bool {
        self.min == self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{Channels, Raster16};

    #[test]
    fn test_empty_input_yields_none() {
        assert_eq!(SampleStats::of_u16(&[]), None);
        assert_eq!(SampleStats::of_u8(&[]), None);
    }

    #[test]
    fn test_extremes_and_mean_over_u16() {
        let stats = SampleStats::of_u16(&[100, 900, 500, 500])
            .expect("non-empty input has stats");
        assert_eq!(stats.min, 100);
        assert_eq!(stats.max, 900);
        assert_eq!(stats.mean, 500.0);
        assert_eq!(stats.range(), 800);
        assert!(!stats.is_flat());
    }

    #[test]
    fn test_flat_input_has_zero_range() {
        let stats = SampleStats::of_u8(&[7, 7, 7]).expect("non-empty input");
        assert_eq!(stats.min, 7);
        assert_eq!(stats.max, 7);
        assert!(stats.is_flat(), "identical samples must report flat");
    }

    #[test]
    fn test_full_u16_range_does_not_overflow() {
        let stats = SampleStats::of_u16(&[0, u16::MAX])
            .expect("non-empty input");
        assert_eq!(stats.range(), u16::MAX);
        assert_eq!(stats.mean, 32767.5);
    }

    #[test]
    fn test_raster_stats_cover_all_channels_together() {
        // One dark red pixel and one bright green pixel: the global extremes
        // mix values from different channels.
        let raster = Raster16::new(
            vec![200, 0, 0, 0, 60_000, 0],
            2,
            1,
            Channels::Rgb,
        )
        .expect("valid 2x1 rgb raster");
        let stats = SampleStats::of_raster(&raster.into());
        assert_eq!(stats.min, 0);
        assert_eq!(stats.max, 60_000);
    }
}
