//! Greedy rectangle covering of a pixel grid.
//!
//! ## Module Map
//!
//! - `finder` - seed selection (first uncovered pixel, resumable scan)
//! - `expander` - right-before-down growth of a seed box
//! - `coverage` - the state machine tying both together

pub mod coverage;
pub mod expander;
pub mod finder;

pub use coverage::{CoverageEngine, CoverageMode, CoverageState, CoverageStats, Painter};
pub use expander::RectangleExpander;
pub use finder::{seed_box, ColorBox, RectangleFinder};
