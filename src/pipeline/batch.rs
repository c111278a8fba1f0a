//! Batch runner: enumerate images, knock out near-black pixels, write results.

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};
use crate::image::{self, DecodedImage};
use crate::mask;

/// Configuration for a batch run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Near-black cutoff in [0, 255]. Pixels strictly below it turn
    /// transparent; values closer to 0 catch only the darkest pixels.
    pub threshold: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self { threshold: 40 }
    }
}

/// Outcome counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files transformed and written.
    pub processed: usize,
    /// Files with an unsupported channel layout, written out unmodified.
    pub passed_through: usize,
    /// Files skipped because they could not be decoded or written.
    pub skipped: usize,
}

/// Sequential batch pipeline over one input directory.
///
/// Each file is fully loaded, transformed, and written before the next
/// is considered. The transform itself is a pure function, so nothing
/// is shared between iterations.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        tracing::info!("Initializing pipeline with config: {config:?}");
        Self { config }
    }

    /// Process every recognized image in `input_dir`, mirroring each
    /// filename into `output_dir`.
    ///
    /// Undecodable or unwritable files are logged and skipped; the run
    /// carries on. Unsupported channel layouts bypass the transform but
    /// are still written.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created or
    /// the input directory cannot be listed. Per-file failures never
    /// abort the run.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchSummary> {
        fs::create_dir_all(output_dir).map_err(|source| Error::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let files = list_image_files(input_dir)?;
        tracing::info!("Found {} image files in {}", files.len(), input_dir.display());

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} Converting [{bar:40.cyan/blue}] {pos}/{len}")
                .expect("valid template")
                .progress_chars("#>-"),
        );

        let mut summary = BatchSummary::default();

        for input_path in &files {
            self.run_one(input_path, output_dir, &mut summary);
            pb.inc(1);
        }

        pb.finish_and_clear();
        tracing::info!(
            "Batch complete: {} processed, {} passed through, {} skipped",
            summary.processed,
            summary.passed_through,
            summary.skipped
        );

        Ok(summary)
    }

    /// Load, transform, and write a single file, tallying the outcome.
    fn run_one(&self, input_path: &Path, output_dir: &Path, summary: &mut BatchSummary) {
        tracing::debug!("Processing {}", input_path.display());

        let decoded = match image::load_image(input_path) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!("Skipping {}: {err}", input_path.display());
                summary.skipped += 1;
                return;
            }
        };

        let untouched = matches!(decoded, DecodedImage::Unsupported(_));
        if untouched {
            tracing::debug!(
                "Unsupported channel layout in {}, writing unmodified",
                input_path.display()
            );
        }

        let output = mask::knock_out(decoded, self.config.threshold);

        // list_image_files only yields paths with a final component.
        let Some(file_name) = input_path.file_name() else {
            summary.skipped += 1;
            return;
        };
        let output_path = output_dir.join(file_name);

        match image::save_image(&output, &output_path) {
            Ok(()) => {
                if untouched {
                    summary.passed_through += 1;
                } else {
                    summary.processed += 1;
                }
            }
            Err(err) => {
                tracing::warn!("Skipping {}: {err}", input_path.display());
                summary.skipped += 1;
            }
        }
    }
}

/// List the recognized image files directly inside `dir`.
fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| Error::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let extension = path.extension()?.to_str()?;
            matches!(extension, "jpg" | "jpeg" | "png").then_some(path)
        })
        .collect();

    files.sort();
    Ok(files)
}
