use std::path::PathBuf;

use thiserror::Error;
use tonescale::{PipelineError, RasterError};

/// Errors raised while preparing a single capture from disk. Every variant
/// carries the path it failed on, so batch runs can say which file broke
/// without re-threading that context through each layer.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{}: unsupported pixel layout {layout}", path.display())]
    UnsupportedLayout { path: PathBuf, layout: String },

    #[error("{}: decoded image has an unusable shape: {source}", path.display())]
    InvalidShape {
        path: PathBuf,
        #[source]
        source: RasterError,
    },

    #[error("failed to prepare {}: {source}", path.display())]
    Pipeline {
        path: PathBuf,
        #[source]
        source: PipelineError,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a folder", path.display())]
    NotAFolder { path: PathBuf },

    #[error("failed to list {}: {source}", path.display())]
    ListFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output folder {}: {source}", path.display())]
    CreateOutputFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PrepError {
    /// The path this error is about.
    pub fn path(&self) -> &PathBuf {
        match self {
            PrepError::Decode { path, .. }
            | PrepError::UnsupportedLayout { path, .. }
            | PrepError::InvalidShape { path, .. }
            | PrepError::Pipeline { path, .. }
            | PrepError::Encode { path, .. }
            | PrepError::Write { path, .. }
            | PrepError::NotAFolder { path }
            | PrepError::ListFolder { path, .. }
            | PrepError::CreateOutputFolder { path, .. } => path,
        }
    }
}

/// Errors raised while resolving configuration into job settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "unknown profile '{requested}', available: {}",
        if available.is_empty() { "none defined".to_string() } else { available.join(", ") }
    )]
    UnknownProfile {
        requested: String,
        available: Vec<String>,
    },
}
