//! Directory-level uniformization.
//!
//! Each input file is processed independently on the rayon pool. A file that
//! fails to load or fit is recorded in the [`BatchReport`] and the run
//! continues with the remaining files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use foildb_core::{FoilError, Result};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::UniformizeConfig;
use crate::loader::load_file;
use crate::uniformize::uniformize;
use crate::writer::write_airfoil;

/// Options for [`uniformize_directory`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Extension of input files, without the dot. Empty accepts every file.
    pub extension: String,
    /// Prepended to the input file name to name the output file.
    pub prefix: String,
    /// Overwrite outputs that already exist.
    pub force: bool,
    pub config: UniformizeConfig,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            extension: "dat".to_string(),
            prefix: "uniform_".to_string(),
            force: false,
            config: UniformizeConfig::default(),
        }
    }
}

/// A file that could not be uniformized.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: FoilError,
}

/// Outcome of a directory run. Paths keep the sorted input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written.
    pub written: Vec<PathBuf>,
    /// Inputs whose output already existed.
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut text = format!(
            "{} files: {} written, {} skipped, {} failed",
            self.total(),
            self.written.len(),
            self.skipped.len(),
            self.failures.len()
        );
        for failure in &self.failures {
            text.push_str(&format!("\n  {}: {}", failure.path.display(), failure.error.root()));
        }
        text
    }
}

enum FileOutcome {
    Written(PathBuf),
    Skipped(PathBuf),
}

/// Files in `dir` with the given extension, sorted by path.
pub fn list_input_files(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        let err = io::Error::new(io::ErrorKind::InvalidInput, "not a directory");
        return Err(FoilError::from(err).in_file(dir));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| FoilError::from(e).in_file(dir))? {
        let path = entry.map_err(|e| FoilError::from(e).in_file(dir))?.path();
        if !path.is_file() {
            continue;
        }
        let matches = extension.is_empty()
            || path.extension().is_some_and(|ext| ext == extension);
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Output location for `input`: `output_dir/<prefix><file name>`.
pub fn output_path(output_dir: impl AsRef<Path>, input: impl AsRef<Path>, prefix: &str) -> PathBuf {
    let name = input
        .as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.as_ref().join(format!("{prefix}{name}"))
}

/// Load, uniformize and write a single file.
pub fn uniformize_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &UniformizeConfig,
) -> Result<()> {
    let input = input.as_ref();
    let raw = load_file(input)?;
    let foil = uniformize(&raw, config).map_err(|e| e.in_file(input))?;
    write_airfoil(output, &foil)
}

fn process(input: &Path, output_dir: &Path, options: &BatchOptions) -> Result<FileOutcome> {
    let output = output_path(output_dir, input, &options.prefix);
    if output.is_file() && !options.force {
        debug!(input = %input.display(), "Output exists, skipping");
        return Ok(FileOutcome::Skipped(output));
    }
    uniformize_file(input, &output, &options.config)?;
    debug!(input = %input.display(), output = %output.display(), "Wrote uniform airfoil");
    Ok(FileOutcome::Written(output))
}

/// Uniformize every matching file of `input_dir` into `output_dir`.
///
/// Only failures to prepare the run (missing input directory, output
/// directory not creatable) are returned as errors; per-file failures are
/// collected in the report.
pub fn uniformize_directory(
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let input_dir = input_dir.as_ref();
    let output_dir = output_dir.as_ref();

    fs::create_dir_all(output_dir).map_err(|e| FoilError::from(e).in_file(output_dir))?;
    let files = list_input_files(input_dir, &options.extension)?;
    info!(
        count = files.len(),
        input = %input_dir.display(),
        output = %output_dir.display(),
        "Uniformizing airfoil files"
    );

    let outcomes: Vec<(PathBuf, Result<FileOutcome>)> = files
        .into_par_iter()
        .map(|input| {
            let outcome = process(&input, output_dir, options);
            (input, outcome)
        })
        .collect();

    let mut report = BatchReport::default();
    for (input, outcome) in outcomes {
        match outcome {
            Ok(FileOutcome::Written(path)) => report.written.push(path),
            Ok(FileOutcome::Skipped(path)) => report.skipped.push(path),
            Err(error) => {
                warn!(path = %input.display(), error = %error.root(), "Skipping airfoil");
                report.failures.push(FileFailure { path: input, error });
            }
        }
    }

    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        failed = report.failures.len(),
        "Batch finished"
    );
    Ok(report)
}
