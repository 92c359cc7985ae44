//! Conversion of a single raster image into an SVG document.
//!
//! # Examples
//!
//! ```no_run
//! use pixel_svg::doc::{convert_one, ConvertOptions};
//!
//! let options = ConvertOptions::new().with_quantize_colors(true);
//! let report = convert_one("art/ship.png", "art/ship.svg", &options)?;
//! println!("{} rectangles", report.stats.rectangles);
//! # Ok::<(), pixel_svg::ConvertError>(())
//! ```

use crate::doc::color::FillPolicy;
use crate::doc::svg_document::SvgDocument;
use crate::encode::boxes::{CoverageEngine, CoverageMode, CoverageStats};
use crate::image::pixel_grid::PixelGrid;
use crate::utils::error::{ConvertError, Result};
use crate::utils::file_path::Destination;
use crate::utils::progress::{LogProgress, ProgressSink};
use log::{debug, info};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Configuration for converting one image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Shorten fills to `#rgb` (at most 4096 colors).
    pub quantize_colors: bool,
    /// Paint rectangles larger than one pixel in the highlight color.
    pub highlight_merged_rectangles: bool,
    /// Never merge pixels: one 1×1 rectangle per visible pixel.
    pub single_pixel_only: bool,
    /// Log progress and size diagnostics at info level.
    pub verbose: bool,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quantize_colors(mut self, enabled: bool) -> Self {
        self.quantize_colors = enabled;
        self
    }

    pub fn with_highlight_merged_rectangles(mut self, enabled: bool) -> Self {
        self.highlight_merged_rectangles = enabled;
        self
    }

    pub fn with_single_pixel_only(mut self, enabled: bool) -> Self {
        self.single_pixel_only = enabled;
        self
    }

    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    pub fn fill_policy(&self) -> FillPolicy {
        FillPolicy::new(self.quantize_colors, self.highlight_merged_rectangles)
    }

    pub fn coverage_mode(&self) -> CoverageMode {
        if self.single_pixel_only {
            CoverageMode::SinglePixel
        } else {
            CoverageMode::Expand
        }
    }
}

/// Summary of a finished conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionReport {
    pub width: u32,
    pub height: u32,
    pub stats: CoverageStats,
    /// Size of the written document in bytes.
    pub bytes: usize,
}

/// A grid together with the document being painted from it.
pub struct Conversion {
    grid: PixelGrid,
    document: SvgDocument,
    options: ConvertOptions,
    stats: CoverageStats,
}

impl Conversion {
    pub fn new(grid: PixelGrid, options: ConvertOptions) -> Self {
        let (width, height) = grid.dimensions();
        let document = SvgDocument::new(width, height, options.fill_policy());
        Self {
            grid,
            document,
            options,
            stats: CoverageStats::default(),
        }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn document(&self) -> &SvgDocument {
        &self.document
    }

    pub fn stats(&self) -> CoverageStats {
        self.stats
    }

    /// Runs the covering loop to completion.
    pub fn cover(&mut self) -> Result<CoverageStats> {
        let mut log_progress = LogProgress;
        let sink: Option<&mut dyn ProgressSink> = if self.options.verbose {
            Some(&mut log_progress)
        } else {
            None
        };
        self.cover_with_progress(sink)
    }

    /// Runs the covering loop, reporting progress by row to `sink`.
    pub fn cover_with_progress(
        &mut self,
        sink: Option<&mut dyn ProgressSink>,
    ) -> Result<CoverageStats> {
        let mut engine = CoverageEngine::new(&mut self.grid, self.options.coverage_mode());
        if let Some(sink) = sink {
            engine = engine.with_progress(sink);
        }
        let stats = engine.run(&mut self.document)?;
        self.stats = stats;
        if self.options.verbose {
            info!(
                "Placed {} rectangles ({} merged) for {} visible pixels",
                stats.rectangles,
                stats.merged,
                self.grid.opaque_count()
            );
        }
        Ok(stats)
    }

    /// Serializes the optimized document. Fails if any pixel is uncovered.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if !self.grid.is_fully_covered() {
            return Err(ConvertError::IncompleteCoverage {
                uncovered: self.grid.uncovered_count(),
            });
        }
        let bytes = self.document.to_optimized_bytes();
        if self.options.verbose {
            info!(
                "Optimized document: {} bytes (unoptimized {} bytes)",
                bytes.len(),
                self.document.render_plain().len()
            );
        }
        Ok(bytes)
    }

    /// Writes the document to a file or to standard output.
    ///
    /// Files are written to a temporary sibling first and moved into place
    /// only once complete, so a failure never leaves a partial document.
    pub fn write_document(&self, destination: &Destination) -> Result<usize> {
        let bytes = self.to_bytes()?;
        match destination {
            Destination::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&bytes)?;
                stdout.flush()?;
            }
            Destination::File(path) => write_atomically(path, &bytes)?,
        }
        debug!("Wrote {} bytes to {}", bytes.len(), destination);
        Ok(bytes.len())
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());
    let mut tmp = new_document_file(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    // Replacing a document keeps its mode
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(path).map_err(|e| ConvertError::Io(e.error))?;
    Ok(())
}

/// Creates the temporary document with the mode `fs::write` would give a new
/// file (0666 less the umask) instead of tempfile's private 0600.
#[cfg(unix)]
fn new_document_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;
    tempfile::Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_document_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// Converts raster bytes to optimized SVG bytes in memory.
pub fn convert_bytes(raster: &[u8], options: &ConvertOptions) -> Result<Vec<u8>> {
    let grid = PixelGrid::load(raster)?;
    convert_grid(grid, options)
}

/// Converts an already decoded grid to optimized SVG bytes.
pub fn convert_grid(grid: PixelGrid, options: &ConvertOptions) -> Result<Vec<u8>> {
    let mut conversion = Conversion::new(grid, *options);
    conversion.cover()?;
    conversion.to_bytes()
}

/// Decodes `source`, covers it with rectangles and writes the SVG to `dest`
/// (`-` for standard output).
pub fn convert_one<S, D>(source: S, dest: D, options: &ConvertOptions) -> Result<ConversionReport>
where
    S: AsRef<Path>,
    D: AsRef<Path>,
{
    let source = source.as_ref();
    let destination = Destination::from(dest.as_ref());
    if options.verbose {
        info!("Converting {} to {}", source.display(), destination);
    }

    let grid = PixelGrid::open(source)?;
    let (width, height) = grid.dimensions();
    let mut conversion = Conversion::new(grid, *options);
    let stats = conversion.cover()?;
    let bytes = conversion.write_document(&destination)?;

    Ok(ConversionReport {
        width,
        height,
        stats,
        bytes,
    })
}
