use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use anyhow::Context;
use graylift::batch;
use graylift::io;
use graylift::models::config::{AppConfig, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, SAMPLE_CONFIG};
use graylift::models::{JobSettings, OutputFormat, ToneCurveChoice};
use tonescale::{Channels, ResizeSpec, SampleStats};

#[derive(Parser)]
#[command(name = "graylift")]
#[command(about = "Prepare 16-bit captures for 8-bit display")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prepare a single capture file
    Process {
        /// Capture file to prepare
        input: PathBuf,

        /// Folder for the result (default: the capture's own folder)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        job: JobArgs,
    },
    /// Prepare every capture in a folder
    Batch {
        /// Folder of captures (not walked recursively)
        folder: PathBuf,

        /// Folder for results (default: processed/ under the input folder)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Stop at the first failing capture
        #[arg(long)]
        stop_on_error: bool,

        /// Do not draw a progress bar
        #[arg(long)]
        no_progress: bool,

        #[command(flatten)]
        job: JobArgs,
    },
    /// Inspect a capture without writing anything
    Probe {
        /// Capture file to inspect
        input: PathBuf,
    },
    /// Write a commented graylift.yaml into the working directory
    Init {
        /// Overwrite an existing graylift.yaml
        #[arg(long, short)]
        force: bool,
    },
}

/// Pipeline and output flags shared by `process` and `batch`.
#[derive(Args)]
struct JobArgs {
    /// Uniform scale factor, e.g. 0.5 halves both dimensions
    #[arg(short, long)]
    scale: Option<f32>,

    /// Exact output width (requires --height)
    #[arg(long)]
    width: Option<u32>,

    /// Exact output height (requires --width)
    #[arg(long)]
    height: Option<u32>,

    /// Tone curve for the 16-bit to 8-bit reduction
    #[arg(short, long)]
    tone: Option<ToneCurveChoice>,

    /// Replicate grayscale output into three identical channels
    #[arg(long)]
    expand_rgb: bool,

    /// Container format for results
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// JPEG quality, 1-100
    #[arg(long)]
    jpeg_quality: Option<u8>,

    /// Profile from the config file to start from
    #[arg(short, long)]
    profile: Option<String>,

    /// Config file to use instead of the default sources
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Process {
            input,
            output_dir,
            job,
        }) => run_process_command(&input, output_dir.as_deref(), &job),
        Some(Commands::Batch {
            folder,
            output_dir,
            stop_on_error,
            no_progress,
            job,
        }) => run_batch_command(&folder, output_dir.as_deref(), stop_on_error, no_progress, &job),
        Some(Commands::Probe { input }) => run_probe_command(&input),
        Some(Commands::Init { force }) => run_init_command(force),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI use; RUST_LOG overrides the default filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "graylift=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Settings from config file and profile, with CLI flags applied on top
fn resolve_settings(job: &JobArgs) -> anyhow::Result<JobSettings> {
    let config = match &job.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            AppConfig::from_yaml(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => AppConfig::load_default_sources(),
    };
    let mut settings = config.settings(job.profile.as_deref())?;
    apply_overrides(&mut settings, job);
    Ok(settings)
}

fn apply_overrides(settings: &mut JobSettings, job: &JobArgs) {
    if let Some(scale) = job.scale {
        if job.width.is_some() || job.height.is_some() {
            tracing::warn!(scale, "Both scale and dimensions set, using scale");
        }
        settings.options.resize = Some(ResizeSpec::Scale(scale));
    } else if let (Some(width), Some(height)) = (job.width, job.height) {
        settings.options.resize = Some(ResizeSpec::Exact { width, height });
    } else if job.width.is_some() || job.height.is_some() {
        tracing::warn!("Ignoring partial dimensions, set both --width and --height");
    }
    if let Some(tone) = job.tone {
        settings.options.tone = tone.into();
    }
    if job.expand_rgb {
        settings.options.expand_rgb = true;
    }
    if let Some(format) = job.format {
        settings.format = format;
    }
    if let Some(quality) = job.jpeg_quality {
        settings.jpeg_quality = quality;
    }
}

/// Prepare one capture and write the result next to it or into --output-dir
fn run_process_command(
    input: &Path,
    output_dir: Option<&Path>,
    job: &JobArgs,
) -> anyhow::Result<()> {
    init_tracing();

    let settings = resolve_settings(job)?;
    let dir = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output folder {}", dir.display()))?;
            dir.to_path_buf()
        }
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let output = io::output_path(input, &dir, settings.format);
    batch::process_file(input, &output, &settings)?;
    println!("Prepared {}", output.display());

    Ok(())
}

/// Prepare every capture in a folder
fn run_batch_command(
    folder: &Path,
    output_dir: Option<&Path>,
    stop_on_error: bool,
    no_progress: bool,
    job: &JobArgs,
) -> anyhow::Result<()> {
    init_tracing();

    let mut settings = resolve_settings(job)?;
    if stop_on_error {
        settings.continue_on_error = false;
    }
    if no_progress {
        settings.progress = false;
    }

    let report = batch::run_batch(folder, output_dir, &settings)?;

    println!("Prepared {} captures", report.processed.len());
    if report.skipped > 0 {
        println!("Skipped {} non-capture files", report.skipped);
    }
    if !report.failed.is_empty() {
        eprintln!("\n{} captures failed:", report.failed.len());
        for (path, err) in &report.failed {
            eprintln!("  {}: {err}", path.display());
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Print capture geometry and sample statistics
fn run_probe_command(input: &Path) -> anyhow::Result<()> {
    init_tracing();

    let raster = io::load_capture(input)?;
    let stats = SampleStats::of_raster(&raster);
    let channels = match raster.channels() {
        Channels::Gray => "gray",
        Channels::Rgb => "rgb",
    };

    println!("{}", input.display());
    println!("  Size:     {}x{}", raster.width(), raster.height());
    println!("  Depth:    {}-bit", raster.bit_depth());
    println!("  Channels: {channels}");
    println!("  Min:      {}", stats.min);
    println!("  Max:      {}", stats.max);
    println!("  Mean:     {:.1}", stats.mean);
    if stats.is_flat() {
        println!("  Note:     flat capture, minmax output will be all black");
    }

    Ok(())
}

/// Write the starter config file
fn run_init_command(force: bool) -> anyhow::Result<()> {
    init_tracing();

    let target = Path::new(DEFAULT_CONFIG_FILE);
    if target.exists() && !force {
        eprintln!("{DEFAULT_CONFIG_FILE} already exists (use --force to overwrite)");
        std::process::exit(1);
    }
    std::fs::write(target, SAMPLE_CONFIG)
        .with_context(|| format!("failed to write {DEFAULT_CONFIG_FILE}"))?;
    println!("Wrote {DEFAULT_CONFIG_FILE}");

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_env = std::env::var(CONFIG_ENV_VAR).ok();

    println!("Graylift v{VERSION}");
    println!("Batch preparation of 16-bit captures for 8-bit display\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV_VAR} = {}",
        config_env.as_deref().unwrap_or("(not set)")
    );

    println!("\nConfig Source:");
    let source = if let Some(ref path) = config_env {
        if Path::new(path).exists() {
            path.clone()
        } else {
            format!("{path} (file not found, using defaults)")
        }
    } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
        DEFAULT_CONFIG_FILE.to_string()
    } else {
        "built-in defaults".to_string()
    };
    println!("  {source}");

    let config = AppConfig::load_default_sources();
    if !config.profiles.is_empty() {
        let mut names: Vec<&String> = config.profiles.keys().collect();
        names.sort();
        println!("\nProfiles:");
        for name in names {
            let marker = if config.default_profile.as_deref() == Some(name.as_str()) {
                " (default)"
            } else {
                ""
            };
            println!("  {name}{marker}");
        }
    }

    println!("\nCommands:");
    println!("  graylift process  Prepare a single capture file");
    println!("  graylift batch    Prepare every capture in a folder");
    println!("  graylift probe    Inspect a capture without writing anything");
    println!("  graylift init     Write a commented graylift.yaml");
    println!("\nRun 'graylift --help' for more details.");
}
