//! Seed selection: where the next rectangle starts.

use crate::image::geom::Rect;
use crate::image::image_formats::Rgba;
use crate::image::pixel_grid::PixelGrid;
use crate::utils::error::{ConvertError, Result};

/// A rectangle proposal with the uniform color sampled at its seed pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorBox {
    pub rect: Rect,
    pub color: Rgba,
}

impl ColorBox {
    pub fn new(rect: Rect, color: Rgba) -> Self {
        Self { rect, color }
    }
}

/// Finds seed pixels in row-major order.
///
/// The finder remembers where the previous seed was found and resumes from
/// there. Everything before the last seed is already covered, so the scan
/// position only moves forward and the whole image is scanned once overall.
#[derive(Debug, Default)]
pub struct RectangleFinder {
    last_x: u32,
    last_y: u32,
}

impl RectangleFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The position the next scan starts from.
    pub fn position(&self) -> (u32, u32) {
        (self.last_x, self.last_y)
    }

    /// Returns the next uncovered pixel, or `None` when the rest of the grid
    /// is covered.
    pub fn next_seed(&mut self, grid: &PixelGrid) -> Option<(u32, u32)> {
        let (x, y) = grid.first_uncovered_from(self.last_x, self.last_y)?;
        self.last_x = x;
        self.last_y = y;
        Some((x, y))
    }
}

/// Creates the 1×1 seed box at an uncovered pixel.
///
/// Seeding a covered pixel means the scan and the coverage state disagree,
/// which is a bug rather than a recoverable condition.
pub fn seed_box(grid: &PixelGrid, x: u32, y: u32) -> Result<ColorBox> {
    if grid.is_covered(x, y) {
        return Err(ConvertError::InvariantViolation(format!(
            "seed pixel ({x}, {y}) is already covered"
        )));
    }
    Ok(ColorBox::new(Rect::unit(x, y), grid.color_at(x, y)))
}
