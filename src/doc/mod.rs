// Document model and optimization
pub mod color;
pub mod optimize;
pub mod svg_document;

// Conversion drivers
pub mod batch;
pub mod converter;

pub use batch::{convert_if_missing, convert_if_missing_with, BatchReport};
pub use color::FillPolicy;
pub use converter::{
    convert_bytes, convert_grid, convert_one, Conversion, ConversionReport, ConvertOptions,
};
pub use svg_document::{Attribute, Node, SvgDocument};
