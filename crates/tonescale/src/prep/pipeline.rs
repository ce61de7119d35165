//! Core preparation logic.
//!
//! The [`Pipeline`] struct turns a decoded capture into a display-ready
//! raster in a fixed stage order:
//!
//! 1. **Resize** (if configured)
//!    - Cubic convolution resampling at the capture's own depth
//!    - Happens first so the interpolator sees full precision
//!
//! 2. **Tone map** (always)
//!    - Reduces 16-bit captures to 8 bits with the configured curve
//!    - 8-bit input still passes through the curve, so low-contrast
//!      material gets the same stretch
//!
//! 3. **Expand** (if configured)
//!    - Replicates grayscale samples into RGB for three-channel consumers
//!
//! # Example
//!
//! ```
//! use tonescale::{Channels, Pipeline, PrepOptions, Raster, Raster16};
//!
//! let capture = Raster16::new(vec![0, 512, 1024, 2048], 2, 2, Channels::Gray)?;
//! let pipeline = Pipeline::new(PrepOptions::new().scale(0.5));
//! let display = pipeline.run(Raster::Sixteen(capture))?;
//!
//! assert_eq!((display.width(), display.height()), (1, 1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::channels::expand_to_rgb;
use crate::raster::{Raster, Raster8};
use crate::resize::{resize16, resize8, scaled_dimensions};
use crate::tonemap::{tonemap16, tonemap8};

use super::error::PipelineError;
use super::options::{PrepOptions, ResizeSpec};

/// Runs the preparation stages over decoded captures.
///
/// A pipeline is cheap to construct and holds no per-raster state, so one
/// instance can process any number of captures with the same options.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PrepOptions,
}

impl Pipeline {
    /// Creates a pipeline with the given options.
    #[inline]
    pub fn new(options: PrepOptions) -> Self {
        Self { options }
    }

    /// The options this pipeline was built with.
    #[inline]
    pub fn options(&self) -> &PrepOptions {
        &self.options
    }

    /// Prepares one capture: resize, tone-map, expand.
    pub fn run(&self, input: Raster) -> Result<Raster8, PipelineError> {
        let input = self.apply_resize(input)?;
        let display = match input {
            Raster::Eight(raster) => tonemap8(raster, self.options.tone),
            Raster::Sixteen(raster) => tonemap16(raster, self.options.tone),
        };
        if self.options.expand_rgb {
            Ok(expand_to_rgb(display))
        } else {
            Ok(display)
        }
    }

    fn apply_resize(&self, input: Raster) -> Result<Raster, PipelineError> {
        let spec = match self.options.resize {
            Some(spec) => spec,
            None => return Ok(input),
        };
        let (width, height) = match spec {
            ResizeSpec::Scale(factor) => {
                scaled_dimensions(input.width(), input.height(), factor)?
            }
            ResizeSpec::Exact { width, height } => (width, height),
        };
        let resized = match input {
            Raster::Eight(raster) => Raster::Eight(resize8(&raster, width, height)?),
            Raster::Sixteen(raster) => {
                Raster::Sixteen(resize16(&raster, width, height)?)
            }
        };
        Ok(resized)
    }
}

/// One-shot convenience for [`Pipeline::new`] followed by [`Pipeline::run`].
pub fn prepare(input: Raster, options: PrepOptions) -> Result<Raster8, PipelineError> {
    Pipeline::new(options).run(input)
}
