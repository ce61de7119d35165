//! tonescale: tone mapping and cubic resampling for 16-bit raster captures
//!
//! This library turns capture-depth rasters (microscopy exports, scanner
//! output, elevation tiles) into display-ready 8-bit rasters. It owns the
//! pixel math only: decoding and encoding image files is the caller's
//! business, which keeps the crate free of format dependencies.
//!
//! # Quick Start
//!
//! The [`Pipeline`] is the primary entry point:
//!
//! ```
//! use tonescale::{Channels, Pipeline, PrepOptions, Raster, Raster16};
//!
//! // A 16-bit capture that only uses a sliver of its range.
//! let samples = vec![1_000u16, 1_002, 1_004, 1_006];
//! let capture = Raster16::new(samples, 2, 2, Channels::Gray).unwrap();
//!
//! let pipeline = Pipeline::new(PrepOptions::new());
//! let display = pipeline.run(Raster::Sixteen(capture)).unwrap();
//!
//! // The used range is stretched to full scale.
//! assert_eq!(display.samples().iter().max(), Some(&255));
//! ```
//!
//! Resizing is part of the same run:
//!
//! ```
//! use tonescale::{prepare, Channels, PrepOptions, Raster16};
//!
//! let capture = Raster16::new(vec![0; 16], 4, 4, Channels::Gray).unwrap();
//! let display = prepare(capture.into(), PrepOptions::new().scale(0.5)).unwrap();
//!
//! assert_eq!((display.width(), display.height()), (2, 2));
//! ```
//!
//! # Pipeline
//!
//! [`Pipeline::run`] applies up to three stages in a fixed order:
//!
//! 1. **Resize** ([`resize16`]/[`resize8`]) - four-tap cubic convolution
//!    (Keys kernel, `a = -0.75`) with pixel-center mapping and replicated
//!    edges
//! 2. **Tone map** ([`tonemap16`]/[`tonemap8`]) - depth reduction with
//!    [`ToneCurve::MinMax`] (contrast stretch) or [`ToneCurve::Linear`]
//! 3. **Expand** ([`expand_to_rgb`]) - grayscale-to-RGB replication for
//!    three-channel consumers
//!
//! Each stage is also exported on its own for callers that need just one
//! operation.
//!
//! # Why resize before tone mapping
//!
//! The cubic kernel has negative lobes, so it overshoots near edges. Run at
//! capture depth, that overshoot lands in 16-bit headroom and the subsequent
//! stretch accounts for it. Run after an early stretch, the same overshoot
//! saturates at 255 and flattens detail next to every hard edge. The
//! pipeline therefore resamples first and reduces depth second.
//!
//! # Numeric conventions
//!
//! - The resampler accumulates in `f32`, then rounds and clamps into the
//!   sample range.
//! - The min-max stretch computes `255 * (s - min) / (max - min)` in `f32`
//!   and truncates; the maximum still maps to exactly 255.
//! - Statistics ([`SampleStats`]) accumulate the mean in `f64`.

pub mod channels;
pub mod prep;
pub mod raster;
pub mod resize;
pub mod stats;
pub mod tonemap;


pub use channels::expand_to_rgb;
pub use prep::{prepare, Pipeline, PipelineError, PrepOptions, ResizeSpec};
pub use raster::{Channels, Raster, Raster16, Raster8, RasterError};
pub use resize::{resize16, resize8, scaled_dimensions, ResizeError};
pub use stats::SampleStats;
pub use tonemap::{tonemap16, tonemap8, ToneCurve};
