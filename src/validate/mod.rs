pub mod validate;

pub use validate::{rasterize_svg, validate_conversion, RenderedSvg};
