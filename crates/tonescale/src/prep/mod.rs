//! Capture preparation: resize, tone-map, expand.
//!
//! This module ties the crate's individual operations into the one pipeline
//! most callers want. The stage order is fixed:
//!
//! 1. **Resize** (cubic convolution) - runs at the capture's own depth so the
//!    interpolator works with full precision
//! 2. **Tone map** - reduces to display depth with the configured curve
//! 3. **Expand** - optional grayscale-to-RGB replication
//!
//! # Presets
//!
//! Two presets cover common use cases:
//!
//! - [`PrepOptions::display()`]: contrast stretch plus RGB expansion, for
//!   results any viewer renders correctly
//! - [`PrepOptions::archive()`]: contrast stretch only, keeping the source
//!   layout

mod error;
mod options;
mod pipeline;

pub use error::PipelineError;
pub use options::{PrepOptions, ResizeSpec};
pub use pipeline::{prepare, Pipeline};
