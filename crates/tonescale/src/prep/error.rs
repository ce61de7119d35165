//! Error type for the preparation pipeline.

use thiserror::Error;

use crate::resize::ResizeError;

/// Errors raised while running a [`Pipeline`](crate::prep::Pipeline).
///
/// Tone mapping and channel expansion are total functions over valid
/// rasters, so today every failure originates in the resize stage. The
/// dedicated type keeps callers insulated from that detail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    /// The resize stage rejected its target dimensions or scale factor.
    #[error("resize stage failed: {0}")]
    Resize(#[from] ResizeError),
}
