// src/utils/log.rs

//! Logging setup for the converter.
//!
//! The library itself only talks to the `log` facade; nothing is printed
//! unless the embedding program installs a logger. Binaries call
//! [`init_logger`] once at startup:
//!
//! ```
//! pixel_svg::utils::log::init_logger(log::LevelFilter::Info);
//! ```
//!
//! `RUST_LOG` still overrides the level passed in, so
//! `RUST_LOG=pixel_svg=debug` shows per-rectangle tracing.

pub use log::{debug, error, info, trace, warn, LevelFilter};

/// Initializes the global logger, writing to standard error.
///
/// Calling it more than once is harmless; later calls are ignored.
///
/// # Arguments
/// * `max_level` - Default maximum level when `RUST_LOG` is not set.
pub fn init_logger(max_level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(max_level)
        .parse_default_env()
        .format_target(false)
        .try_init();
}

/// Maps the `verbose` switch of the command line onto a level filter.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbose() {
        assert_eq!(level_for(true), LevelFilter::Info);
        assert_eq!(level_for(false), LevelFilter::Warn);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logger(LevelFilter::Debug);
        init_logger(LevelFilter::Warn);
    }
}
