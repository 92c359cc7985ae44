//! Directory-level conversion: convert every raster that has no SVG yet.
//!
//! Each image runs through its own independent pipeline, so with the `rayon`
//! feature enabled the images of a batch are converted in parallel.

use crate::doc::converter::{convert_one, ConvertOptions};
use crate::utils::error::{ConvertError, Result};
use crate::utils::file_path::{is_raster_path, vector_file_name};
use log::{info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Outcome of a directory conversion.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Documents written: (raster, document).
    pub converted: Vec<(PathBuf, PathBuf)>,
    /// Documents that already existed and were left untouched.
    pub skipped: Vec<PathBuf>,
    /// Rasters whose conversion failed, with the reason.
    pub failed: Vec<(PathBuf, ConvertError)>,
    /// Rasters not converted because an earlier one (in name order) maps to
    /// the same document, e.g. `a.png` after `a.gif`.
    pub shadowed: Vec<PathBuf>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Converts every raster in `raster_dir` lacking a same-named `.svg` in
/// `vector_dir`, using default options.
pub fn convert_if_missing<R, V>(raster_dir: R, vector_dir: V) -> Result<BatchReport>
where
    R: AsRef<Path>,
    V: AsRef<Path>,
{
    convert_if_missing_with(raster_dir, vector_dir, &ConvertOptions::default())
}

/// Like [`convert_if_missing`] with explicit options.
///
/// Listing the directory is the only fatal step; a failing image is recorded
/// in the report and the remaining images are still converted.
pub fn convert_if_missing_with<R, V>(
    raster_dir: R,
    vector_dir: V,
    options: &ConvertOptions,
) -> Result<BatchReport>
where
    R: AsRef<Path>,
    V: AsRef<Path>,
{
    let raster_dir = raster_dir.as_ref();
    let vector_dir = vector_dir.as_ref();

    let mut rasters = Vec::new();
    for entry in std::fs::read_dir(raster_dir)? {
        let path = entry?.path();
        if path.is_file() && is_raster_path(&path) {
            rasters.push(path);
        }
    }
    rasters.sort();

    let mut report = BatchReport::default();
    let mut pending = Vec::new();
    let mut queued = HashSet::new();
    for raster in rasters {
        let Some(name) = vector_file_name(&raster) else {
            continue;
        };
        let target = vector_dir.join(name);
        if queued.contains(&target) {
            warn!(
                "{} maps to {} which is already queued, skipping",
                raster.display(),
                target.display()
            );
            report.shadowed.push(raster);
        } else if target.exists() {
            info!("{} exists and will not be converted", target.display());
            report.skipped.push(target);
        } else {
            info!("{} will be converted to SVG", raster.display());
            queued.insert(target.clone());
            pending.push((raster, target));
        }
    }

    for (raster, target, outcome) in run_all(pending, options) {
        match outcome {
            Ok(()) => report.converted.push((raster, target)),
            Err(err) => {
                warn!("Failed to convert {}: {}", raster.display(), err);
                report.failed.push((raster, err));
            }
        }
    }
    Ok(report)
}

type Outcome = (PathBuf, PathBuf, Result<()>);

fn convert_pair(raster: PathBuf, target: PathBuf, options: &ConvertOptions) -> Outcome {
    let outcome = convert_one(&raster, &target, options).map(|_| ());
    (raster, target, outcome)
}

#[cfg(feature = "rayon")]
fn run_all(pending: Vec<(PathBuf, PathBuf)>, options: &ConvertOptions) -> Vec<Outcome> {
    use rayon::prelude::*;
    pending
        .into_par_iter()
        .map(|(raster, target)| convert_pair(raster, target, options))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn run_all(pending: Vec<(PathBuf, PathBuf)>, options: &ConvertOptions) -> Vec<Outcome> {
    pending
        .into_iter()
        .map(|(raster, target)| convert_pair(raster, target, options))
        .collect()
}
