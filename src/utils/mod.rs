//! General-purpose utility modules.

pub mod error;
pub mod file_path;
pub mod log;
pub mod progress;

// Re-export commonly used items
pub use error::{ConvertError, Result};
