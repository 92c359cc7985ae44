//! The scan → seed → expand → paint loop.
//!
//! The engine owns no pixels itself: it drives a [`RectangleFinder`] and a
//! [`RectangleExpander`] over a borrowed [`PixelGrid`] and hands every
//! accepted box to a [`Painter`], then marks the box covered. It stops once
//! the grid reports full coverage.
//!
//! ```text
//! Scanning ──► Seeding ──► Expanding ──► Painting ──► Scanning | Done
//!                 └────────(single-pixel mode)───────►┘
//! ```

use crate::encode::boxes::expander::RectangleExpander;
use crate::encode::boxes::finder::{seed_box, ColorBox, RectangleFinder};
use crate::image::pixel_grid::PixelGrid;
use crate::utils::error::{ConvertError, Result};
use crate::utils::progress::{ProgressSink, RowProgress};
use log::{debug, trace};

/// Receives boxes as they are accepted.
pub trait Painter {
    /// `merged` is true when the box grew beyond its 1×1 seed.
    fn paint(&mut self, bx: &ColorBox, merged: bool);
}

impl Painter for Vec<ColorBox> {
    fn paint(&mut self, bx: &ColorBox, _merged: bool) {
        self.push(*bx);
    }
}

/// How boxes are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverageMode {
    /// Grow every seed as far as it goes.
    #[default]
    Expand,
    /// One 1×1 box per remaining pixel, no merging.
    SinglePixel,
}

/// States of the covering loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageState {
    Scanning,
    Seeding { x: u32, y: u32 },
    Expanding(ColorBox),
    Painting { bx: ColorBox, merged: bool },
    Done,
}

/// Counters collected while covering an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverageStats {
    /// Boxes painted.
    pub rectangles: usize,
    /// Boxes larger than one pixel.
    pub merged: usize,
    /// Pixels represented by painted boxes.
    pub pixels_covered: u64,
}

pub struct CoverageEngine<'g, 'p> {
    grid: &'g mut PixelGrid,
    mode: CoverageMode,
    finder: RectangleFinder,
    state: CoverageState,
    stats: CoverageStats,
    progress: RowProgress<'p>,
}

impl<'g, 'p> CoverageEngine<'g, 'p> {
    pub fn new(grid: &'g mut PixelGrid, mode: CoverageMode) -> Self {
        let rows = grid.height();
        Self {
            grid,
            mode,
            finder: RectangleFinder::new(),
            state: CoverageState::Scanning,
            stats: CoverageStats::default(),
            progress: RowProgress::new("Placing rectangles", rows, None),
        }
    }

    /// Reports percentage complete by row to `sink`.
    pub fn with_progress(mut self, sink: &'p mut dyn ProgressSink) -> Self {
        self.progress = RowProgress::new("Placing rectangles", self.grid.height(), Some(sink));
        self
    }

    pub fn state(&self) -> CoverageState {
        self.state
    }

    pub fn stats(&self) -> CoverageStats {
        self.stats
    }

    /// Advances the state machine by one transition.
    pub fn step<P: Painter + ?Sized>(&mut self, painter: &mut P) -> Result<CoverageState> {
        self.state = match self.state {
            CoverageState::Scanning => match self.finder.next_seed(self.grid) {
                Some((x, y)) => {
                    self.progress.row(y);
                    CoverageState::Seeding { x, y }
                }
                None => {
                    if !self.grid.is_fully_covered() {
                        return Err(ConvertError::InvariantViolation(format!(
                            "scan found nothing but {} pixels are uncovered",
                            self.grid.uncovered_count()
                        )));
                    }
                    CoverageState::Done
                }
            },
            CoverageState::Seeding { x, y } => {
                let bx = seed_box(self.grid, x, y)?;
                match self.mode {
                    CoverageMode::Expand => CoverageState::Expanding(bx),
                    CoverageMode::SinglePixel => CoverageState::Painting { bx, merged: false },
                }
            }
            CoverageState::Expanding(mut bx) => {
                let merged = RectangleExpander::new(self.grid).expand(&mut bx);
                CoverageState::Painting { bx, merged }
            }
            CoverageState::Painting { bx, merged } => {
                self.paint(painter, &bx, merged);
                let (x, y) = (bx.rect.x, bx.rect.y);
                if self.grid.is_fully_covered_from(x, y) {
                    CoverageState::Done
                } else {
                    CoverageState::Scanning
                }
            }
            CoverageState::Done => CoverageState::Done,
        };
        Ok(self.state)
    }

    fn paint<P: Painter + ?Sized>(&mut self, painter: &mut P, bx: &ColorBox, merged: bool) {
        trace!(
            "box {}x{} at ({}, {}) {}",
            bx.rect.width,
            bx.rect.height,
            bx.rect.x,
            bx.rect.y,
            bx.color
        );
        painter.paint(bx, merged);
        self.grid.mark_covered(&bx.rect);
        self.stats.rectangles += 1;
        self.stats.pixels_covered += bx.rect.area();
        if merged {
            self.stats.merged += 1;
        }
    }

    /// Runs the loop until every pixel is covered.
    pub fn run<P: Painter + ?Sized>(mut self, painter: &mut P) -> Result<CoverageStats> {
        while self.step(painter)? != CoverageState::Done {}
        self.progress.finish();
        debug!(
            "Covered image with {} rectangles ({} merged, {} pixels)",
            self.stats.rectangles, self.stats.merged, self.stats.pixels_covered
        );
        Ok(self.stats)
    }
}
