// src/image/pixel_grid.rs

//! The decoded raster plus the coverage state of every pixel.
//!
//! Colors are stored once, row-major (`y * width + x`), and never change after
//! construction. Coverage lives in a parallel bit set: a pixel is *covered*
//! once some emitted rectangle represents it, or from the start when it is
//! fully transparent. Rectangles are validated against and painted into this
//! grid by index, so no pixel is ever aliased.

use crate::image::geom::Rect;
use crate::image::image_formats::{pixels_from_raw, Rgba};
use crate::utils::error::{ConvertError, Result};
use bitvec::prelude::*;
use log::debug;
use std::path::Path;

pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    covered: BitVec,
}

impl PixelGrid {
    /// Builds a grid from decoded pixels. Transparent pixels start covered.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ConvertError::DimensionMismatch {
                expected: expected * 4,
                actual: pixels.len() * 4,
            });
        }
        let covered = pixels.iter().map(Rgba::is_transparent).collect();
        Ok(PixelGrid {
            width,
            height,
            pixels,
            covered,
        })
    }

    /// Builds a grid from a raw, non-premultiplied RGBA8 buffer.
    pub fn from_rgba(width: u32, height: u32, raw: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        let pixels = match pixels_from_raw(raw) {
            Some(pixels) if raw.len() == expected => pixels.to_vec(),
            _ => {
                return Err(ConvertError::DimensionMismatch {
                    expected,
                    actual: raw.len(),
                })
            }
        };
        Self::from_pixels(width, height, pixels)
    }

    /// Builds a grid from an already decoded image of any color type.
    pub fn from_image(img: &image::DynamicImage) -> Result<Self> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.as_raw())
    }

    /// Decodes raster bytes in any format the `image` crate recognizes.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        Self::from_image(&img)
    }

    /// Reads and decodes a raster file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let grid = Self::load(&bytes)?;
        debug!("Read {} ({}x{})", path.display(), grid.width, grid.height);
        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the dimensions as a tuple (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// The color at a pixel. Panics when out of bounds.
    pub fn color_at(&self, x: u32, y: u32) -> Rgba {
        self.pixels[self.index(x, y)]
    }

    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        self.covered[self.index(x, y)]
    }

    /// Marks every pixel of `rect` as covered.
    pub fn mark_covered(&mut self, rect: &Rect) {
        debug_assert!(rect.fits_within(self.width, self.height));
        let width = self.width as usize;
        for y in rect.y..rect.y_max() {
            let start = y as usize * width + rect.x as usize;
            self.covered[start..start + rect.width as usize].fill(true);
        }
    }

    pub fn is_fully_covered(&self) -> bool {
        self.covered.all()
    }

    /// True when every pixel at or after (x, y) in row-major order is covered.
    pub fn is_fully_covered_from(&self, x: u32, y: u32) -> bool {
        self.first_uncovered_from(x, y).is_none()
    }

    /// Scans row-major from (x, y), continuing at column 0 on the following
    /// rows, and returns the first uncovered pixel.
    pub fn first_uncovered_from(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        if self.width == 0 || y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize + x.min(self.width) as usize;
        let offset = self.covered[start..].first_zero()?;
        let index = start + offset;
        let w = self.width as usize;
        Some(((index % w) as u32, (index / w) as u32))
    }

    pub fn uncovered_count(&self) -> usize {
        self.covered.count_zeros()
    }

    /// Number of pixels that are not fully transparent.
    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|p| !p.is_transparent()).count()
    }
}
