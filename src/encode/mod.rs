pub mod boxes;

pub use boxes::{ColorBox, CoverageEngine, CoverageMode, CoverageStats, Painter};
