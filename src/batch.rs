//! Running the preparation pipeline over single files and whole folders.
//!
//! A batch run walks one folder (no recursion), picks up every file with a
//! capture extension, and writes results into the output folder under the
//! `processed_` naming scheme. Failures on individual captures are recorded
//! and skipped by default so one truncated file does not sink an overnight
//! run; `continue_on_error = false` turns them back into hard errors.

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tonescale::prep::Pipeline;

use crate::error::PrepError;
use crate::io;
use crate::models::JobSettings;

/// Folder created under the input folder when no output folder is given.
pub const DEFAULT_OUTPUT_FOLDER: &str = "processed";

/// Outcome of a folder run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output paths written, in processing order.
    pub processed: Vec<PathBuf>,
    /// Captures that failed, with the error that stopped each one.
    pub failed: Vec<(PathBuf, PrepError)>,
    /// Directory entries ignored because they are not capture files.
    pub skipped: usize,
}

impl BatchReport {
    /// True when every capture made it through.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Prepares a single capture and writes the result to `output`.
pub fn process_file(
    input: &Path,
    output: &Path,
    settings: &JobSettings,
) -> Result<(), PrepError> {
    let pipeline = Pipeline::new(settings.options.clone());
    process_with(&pipeline, input, output, settings.jpeg_quality)
}

/// Prepares every capture file in `input_dir`.
///
/// Output lands in `output_dir`, or in a `processed/` folder created under
/// the input folder when none is given. Files without a capture extension
/// and sub-folders are ignored. Processing order is the sorted file name
/// order, so runs are reproducible.
pub fn run_batch(
    input_dir: &Path,
    output_dir: Option<&Path>,
    settings: &JobSettings,
) -> Result<BatchReport, PrepError> {
    if !input_dir.is_dir() {
        return Err(PrepError::NotAFolder {
            path: input_dir.to_path_buf(),
        });
    }
    let (captures, skipped) = list_captures(input_dir)?;
    let output_dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input_dir.join(DEFAULT_OUTPUT_FOLDER),
    };
    fs::create_dir_all(&output_dir).map_err(|source| PrepError::CreateOutputFolder {
        path: output_dir.clone(),
        source,
    })?;

    tracing::info!(
        folder = %input_dir.display(),
        captures = captures.len(),
        skipped,
        "Starting batch run"
    );

    let bar = if settings.progress {
        build_progress_bar(captures.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    let pipeline = Pipeline::new(settings.options.clone());
    let mut report = BatchReport {
        skipped,
        ..BatchReport::default()
    };

    for input in captures {
        if let Some(name) = input.file_name() {
            bar.set_message(name.to_string_lossy().into_owned());
        }
        let output = io::output_path(&input, &output_dir, settings.format);
        match process_with(&pipeline, &input, &output, settings.jpeg_quality) {
            Ok(()) => report.processed.push(output),
            Err(err) if settings.continue_on_error => {
                tracing::warn!(
                    capture = %input.display(),
                    error = %err,
                    "Capture failed, moving on"
                );
                report.failed.push((input, err));
            }
            Err(err) => {
                bar.abandon();
                return Err(err);
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    tracing::info!(
        written = report.processed.len(),
        failed = report.failed.len(),
        "Batch run finished"
    );
    Ok(report)
}

fn process_with(
    pipeline: &Pipeline,
    input: &Path,
    output: &Path,
    jpeg_quality: u8,
) -> Result<(), PrepError> {
    let capture = io::load_capture(input)?;
    let prepared = pipeline
        .run(capture)
        .map_err(|source| PrepError::Pipeline {
            path: input.to_path_buf(),
            source,
        })?;
    io::save_display(&prepared, output, jpeg_quality)?;
    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        "Capture prepared"
    );
    Ok(())
}

/// Capture files in `dir` in sorted name order, plus a count of entries
/// that were passed over.
fn list_captures(dir: &Path) -> Result<(Vec<PathBuf>, usize), PrepError> {
    let entries = fs::read_dir(dir).map_err(|source| PrepError::ListFolder {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut captures = Vec::new();
    let mut skipped = 0;
    for entry in entries {
        let entry = entry.map_err(|source| PrepError::ListFolder {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if io::is_capture_file(&path) {
            captures.push(path);
        } else {
            skipped += 1;
        }
    }
    captures.sort();
    Ok((captures, skipped))
}

fn build_progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid progress bar template")
            .progress_chars("=>-"),
    );
    bar
}
