//! Raster-side types: pixels, rectangles and the coverage grid.

pub mod geom;
pub mod image_formats;
pub mod pixel_grid;

pub use geom::Rect;
pub use image_formats::Rgba;
pub use pixel_grid::PixelGrid;
