pub mod config;
pub mod format;

pub use config::{AppConfig, BatchConfig, JobSettings, OutputConfig, PipelineConfig, ProfileConfig};
pub use format::{OutputFormat, ToneCurveChoice};
