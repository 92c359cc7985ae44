// src/image/geom.rs

//! Geometric primitives for axis-aligned rectangles on the pixel grid.

/// An axis-aligned rectangle in pixel coordinates.
///
/// The rectangle is defined by its top-left corner (`x`, `y`) and its `width`
/// and `height`. The right and bottom edges are exclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// A 1×1 rectangle at the given pixel.
    pub fn unit(x: u32, y: u32) -> Self {
        Rect::new(x, y, 1, 1)
    }

    /// Returns the x-coordinate of the right edge (`x + width`).
    pub fn x_max(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the y-coordinate of the bottom edge (`y + height`).
    pub fn y_max(&self) -> u32 {
        self.y + self.height
    }

    /// Checks if the rectangle has zero width or height.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels enclosed.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True when the rectangle is larger than a single pixel.
    pub fn is_merged(&self) -> bool {
        self.width > 1 || self.height > 1
    }

    /// Checks if a point is contained within the rectangle's bounds.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        !self.is_empty() && px >= self.x && px < self.x_max() && py >= self.y && py < self.y_max()
    }

    /// True when both rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.intersection(other).is_empty()
    }

    /// Returns a new rectangle that is the intersection of `self` and `other`.
    pub fn intersection(&self, other: &Rect) -> Rect {
        if self.is_empty() || other.is_empty() {
            return Rect::default();
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let x_max = self.x_max().min(other.x_max());
        let y_max = self.y_max().min(other.y_max());

        if x >= x_max || y >= y_max {
            Rect::default()
        } else {
            Rect::new(x, y, x_max - x, y_max - y)
        }
    }

    /// Checks if the rectangle lies completely inside a `width`×`height` grid.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x_max() <= width && self.y_max() <= height
    }
}
