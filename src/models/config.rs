use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use tonescale::{PrepOptions, ResizeSpec};

use crate::error::ConfigError;
use crate::models::format::{OutputFormat, ToneCurveChoice};

/// Name of the config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "graylift.yaml";

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "GRAYLIFT_CONFIG";

/// Commented starter configuration written by `graylift init`.
pub const SAMPLE_CONFIG: &str = r#"# Graylift configuration. Picked up as graylift.yaml in the working
# directory, or from the file named by GRAYLIFT_CONFIG.

pipeline:
  # Uniform scale factor. Remove it to keep the capture size, or replace
  # it with exact `width:` and `height:` values.
  scale: 0.5
  # Tone curve for the 16-bit to 8-bit reduction: minmax or linear.
  tone: minmax
  # Replicate grayscale results into three identical channels.
  expand_rgb: false

output:
  # Container for results: keep, png, tiff or jpeg.
  format: keep
  jpeg_quality: 90

batch:
  continue_on_error: true
  progress: true

# Named bundles selectable with --profile. A selected profile replaces
# the pipeline and output sections above wholesale.
profiles:
  web:
    pipeline:
      scale: 0.25
      expand_rgb: true
    output:
      format: jpeg
      jpeg_quality: 80
  archive:
    output:
      format: tiff
"#;

/// Application configuration loaded from graylift.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Pixel pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Output encoding settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Batch run behavior
    #[serde(default)]
    pub batch: BatchConfig,

    /// Named setting bundles selectable with --profile
    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,

    /// Profile applied when --profile is not given
    #[serde(default)]
    pub default_profile: Option<String>,
}

/// Resize and tone mapping settings.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    /// Uniform scale factor; wins over width/height when both are given
    #[serde(default)]
    pub scale: Option<f32>,

    /// Exact target width (requires height)
    #[serde(default)]
    pub width: Option<u32>,

    /// Exact target height (requires width)
    #[serde(default)]
    pub height: Option<u32>,

    /// Tone curve for the depth reduction
    #[serde(default)]
    pub tone: ToneCurveChoice,

    /// Expand grayscale results to three channels
    #[serde(default)]
    pub expand_rgb: bool,
}

impl PipelineConfig {
    /// Resolves the resize fields into a [`ResizeSpec`].
    ///
    /// A scale factor wins over exact dimensions. A lone width or height is
    /// ignored with a warning rather than guessing the missing axis.
    pub fn resize_spec(&self) -> Option<ResizeSpec> {
        if let Some(scale) = self.scale {
            if self.width.is_some() || self.height.is_some() {
                tracing::warn!(scale, "Both scale and dimensions set, using scale");
            }
            return Some(ResizeSpec::Scale(scale));
        }
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(ResizeSpec::Exact { width, height }),
            (None, None) => None,
            (width, height) => {
                tracing::warn!(
                    ?width,
                    ?height,
                    "Ignoring partial dimensions, set both width and height"
                );
                None
            }
        }
    }

    /// Builds pipeline options from this section.
    pub fn prep_options(&self) -> PrepOptions {
        let mut options = PrepOptions::new()
            .tone(self.tone.into())
            .expand_rgb(self.expand_rgb);
        if let Some(spec) = self.resize_spec() {
            options.resize = Some(spec);
        }
        options
    }
}

/// Output encoding settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Container format for results
    #[serde(default)]
    pub format: OutputFormat,

    /// JPEG quality, 1-100
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_jpeg_quality() -> u8 {
    90
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

/// Batch run behavior.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BatchConfig {
    /// Keep going when one file fails
    #[serde(default = "default_true")]
    pub continue_on_error: bool,

    /// Draw a progress bar during batch runs
    #[serde(default = "default_true")]
    pub progress: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            continue_on_error: true,
            progress: true,
        }
    }
}

/// A named bundle of pipeline and output settings.
///
/// A selected profile replaces the top-level `pipeline` and `output`
/// sections wholesale; it does not merge with them field by field.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ProfileConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Everything one prepare or batch run needs, resolved from config and
/// profile selection. CLI flags override individual fields afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSettings {
    pub options: PrepOptions,
    pub format: OutputFormat,
    pub jpeg_quality: u8,
    pub continue_on_error: bool,
    pub progress: bool,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            options: PrepOptions::new(),
            format: OutputFormat::default(),
            jpeg_quality: default_jpeg_quality(),
            continue_on_error: true,
            progress: true,
        }
    }
}

impl AppConfig {
    /// Parses configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Loads configuration from the default sources.
    ///
    /// Tries `GRAYLIFT_CONFIG` first, then `graylift.yaml` in the working
    /// directory. Unreadable or unparsable implicit sources log a warning
    /// and fall back to defaults; only an explicit `--config` path (handled
    /// by the caller) is a hard error.
    pub fn load_default_sources() -> Self {
        let candidate = match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Some(std::path::PathBuf::from(path)),
            _ => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                local.exists().then(|| local.to_path_buf())
            }
        };
        let Some(path) = candidate else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        profiles = config.profiles.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Resolves a profile selection into concrete job settings.
    ///
    /// With no selection the `default_profile` applies if set; otherwise the
    /// top-level sections do. Requesting a profile that does not exist is an
    /// error, whether it was named on the command line or in the config.
    pub fn settings(&self, profile: Option<&str>) -> Result<JobSettings, ConfigError> {
        let selected = profile.or(self.default_profile.as_deref());
        let (pipeline, output) = match selected {
            Some(name) => match self.profiles.get(name) {
                Some(profile) => (&profile.pipeline, &profile.output),
                None => {
                    let mut available: Vec<String> =
                        self.profiles.keys().cloned().collect();
                    available.sort();
                    return Err(ConfigError::UnknownProfile {
                        requested: name.to_string(),
                        available,
                    });
                }
            },
            None => (&self.pipeline, &self.output),
        };
        Ok(JobSettings {
            options: pipeline.prep_options(),
            format: output.format,
            jpeg_quality: output.jpeg_quality,
            continue_on_error: self.batch.continue_on_error,
            progress: self.batch.progress,
        })
    }
}
