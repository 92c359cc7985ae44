//! A Rust library for converting pixel art into SVG documents.
//!
//! Every visible pixel of a raster image is covered by exactly one
//! axis-aligned rectangle of its own color. Rectangles are grown greedily
//! from the first uncovered pixel in row-major order, and the resulting
//! document is shrunk by grouping shared fills, dropping default attributes
//! and using named color keywords where they are shorter.
//!
//! # Quick Start
//!
//! ```no_run
//! use pixel_svg::{convert_one, ConvertOptions};
//!
//! // Lossless conversion
//! convert_one("sprite.png", "sprite.svg", &ConvertOptions::default())?;
//!
//! // 12-bit colors, merged rectangles drawn in the highlight color
//! let options = ConvertOptions::new()
//!     .with_quantize_colors(true)
//!     .with_highlight_merged_rectangles(true);
//! convert_one("sprite.png", "-", &options)?;
//! # Ok::<(), pixel_svg::ConvertError>(())
//! ```
//!
//! # Features
//!
//! - **Non-overlapping cover**: each visible pixel lies in exactly one rectangle
//! - **Transparency**: fully transparent pixels produce no output
//! - **Batch conversion**: [`convert_if_missing`] converts every image of a
//!   directory that has no SVG yet
//! - **Optional parallelism**: enable the `rayon` feature to convert the
//!   images of a batch in parallel

// Core modules
pub mod doc;
pub mod encode;
pub mod image;
pub mod utils;
pub mod validate;

// Conversion API
pub use doc::{
    convert_bytes, convert_grid, convert_if_missing, convert_if_missing_with, convert_one,
    BatchReport, Conversion, ConversionReport, ConvertOptions, FillPolicy, SvgDocument,
};

// Coverage types
pub use encode::{ColorBox, CoverageEngine, CoverageMode, CoverageStats, Painter};
pub use crate::image::{PixelGrid, Rect, Rgba};

// Error types
pub use utils::error::{ConvertError, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_convert_grid() {
        let white = Rgba::opaque(255, 255, 255);
        let grid = PixelGrid::from_pixels(2, 2, vec![white; 4]).unwrap();
        let svg = String::from_utf8(convert_grid(grid, &ConvertOptions::default()).unwrap()).unwrap();
        assert!(svg.contains(r##"<rect width="2" height="2" fill="#ffffff"/>"##));
    }

    #[test]
    fn test_public_api_engine() {
        let mut grid = PixelGrid::from_pixels(1, 1, vec![Rgba::opaque(1, 2, 3)]).unwrap();
        let mut painted: Vec<ColorBox> = Vec::new();
        let stats = CoverageEngine::new(&mut grid, CoverageMode::Expand)
            .run(&mut painted)
            .unwrap();
        assert_eq!(stats.rectangles, 1);
        assert_eq!(painted[0].rect, Rect::unit(0, 0));
    }
}
