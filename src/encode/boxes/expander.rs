//! Greedy growth of a seed box.
//!
//! A box grows one pixel column to the right or one pixel row downwards at a
//! time, as long as every newly enclosed pixel is uncovered and has exactly
//! the box's RGBA color. Right is always tried first, and after any successful
//! step the search starts over with right. This biases towards wide boxes,
//! which suits horizontally coherent pixel art.

use crate::encode::boxes::finder::ColorBox;
use crate::image::image_formats::Rgba;
use crate::image::pixel_grid::PixelGrid;

/// Grows boxes against a grid without mutating it.
pub struct RectangleExpander<'a> {
    grid: &'a PixelGrid,
}

impl<'a> RectangleExpander<'a> {
    pub fn new(grid: &'a PixelGrid) -> Self {
        Self { grid }
    }

    fn matches(&self, color: Rgba, x: u32, y: u32) -> bool {
        !self.grid.is_covered(x, y) && self.grid.color_at(x, y) == color
    }

    /// Tries to add the column at `x + width`.
    pub fn expand_right(&self, bx: &mut ColorBox) -> bool {
        let x = bx.rect.x_max();
        if x >= self.grid.width() {
            return false;
        }
        if !(bx.rect.y..bx.rect.y_max()).all(|y| self.matches(bx.color, x, y)) {
            return false;
        }
        bx.rect.width += 1;
        true
    }

    /// Tries to add the row at `y + height`.
    pub fn expand_down(&self, bx: &mut ColorBox) -> bool {
        let y = bx.rect.y_max();
        if y >= self.grid.height() {
            return false;
        }
        if !(bx.rect.x..bx.rect.x_max()).all(|x| self.matches(bx.color, x, y)) {
            return false;
        }
        bx.rect.height += 1;
        true
    }

    /// One growth step: right, or down if right fails.
    pub fn expand_once(&self, bx: &mut ColorBox) -> bool {
        self.expand_right(bx) || self.expand_down(bx)
    }

    /// Grows the box until neither direction succeeds.
    /// Returns true if the box grew at least once.
    pub fn expand(&self, bx: &mut ColorBox) -> bool {
        let mut expanded = false;
        while self.expand_once(bx) {
            expanded = true;
        }
        expanded
    }
}
