// src/utils/error.rs

use thiserror::Error;

/// The primary error type for all operations in the pixel-to-SVG converter.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The source raster could not be decoded (unknown format, corrupt data).
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// The covering algorithm reached a state it should never reach.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// The document was serialized before every pixel had been covered.
    #[error("The SVG representation does not cover all pixels ({uncovered} uncovered)")]
    IncompleteCoverage { uncovered: usize },

    /// An error occurred while reading the source or writing the destination.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A raw pixel buffer does not match the declared image dimensions.
    #[error("Dimension mismatch: expected {expected} bytes, but got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An SVG document handed to the validator is malformed.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// A specialized `Result` type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
