//! Path helpers for naming converted documents and choosing where they go.

use std::fmt;
use std::path::{Path, PathBuf};

/// Sentinel destination meaning "write to standard output".
pub const STDOUT_SENTINEL: &str = "-";

/// Extension given to converted documents.
pub const VECTOR_EXTENSION: &str = "svg";

/// Where a rendered document is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Stdout,
}

impl Destination {
    /// Parse a destination argument. `-` selects standard output.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixel_svg::utils::file_path::Destination;
    /// use std::path::PathBuf;
    ///
    /// assert_eq!(Destination::parse("-"), Destination::Stdout);
    /// assert_eq!(Destination::parse("out.svg"), Destination::File(PathBuf::from("out.svg")));
    /// ```
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s == STDOUT_SENTINEL {
            Destination::Stdout
        } else {
            Destination::File(PathBuf::from(s))
        }
    }
}

impl From<&Path> for Destination {
    fn from(path: &Path) -> Self {
        if path.as_os_str() == STDOUT_SENTINEL {
            Destination::Stdout
        } else {
            Destination::File(path.to_path_buf())
        }
    }
}

impl From<PathBuf> for Destination {
    fn from(path: PathBuf) -> Self {
        Destination::from(path.as_path())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::File(path) => write!(f, "{}", path.display()),
            Destination::Stdout => write!(f, "<stdout>"),
        }
    }
}

/// File name of the document produced for a raster file:
/// `art/ship.png` → `ship.svg`. Returns `None` for paths without a file stem.
pub fn vector_file_name(raster: &Path) -> Option<PathBuf> {
    let stem = raster.file_stem()?;
    let mut name = PathBuf::from(stem);
    name.set_extension(VECTOR_EXTENSION);
    Some(name)
}

/// Default output path next to the input: `art/ship.png` → `art/ship.svg`.
pub fn sibling_vector_path(raster: &Path) -> PathBuf {
    raster.with_extension(VECTOR_EXTENSION)
}

/// Whether the `image` crate knows how to decode a file with this extension.
pub fn is_raster_path(path: &Path) -> bool {
    image::ImageFormat::from_path(path)
        .map(|format| format.reading_enabled())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stdout() {
        assert_eq!(Destination::parse("-"), Destination::Stdout);
        assert_eq!(Destination::parse(" - "), Destination::Stdout);
    }

    #[test]
    fn test_parse_file() {
        assert_eq!(
            Destination::parse("out/ship.svg"),
            Destination::File(PathBuf::from("out/ship.svg"))
        );
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Destination::from(Path::new("-")), Destination::Stdout);
        assert_eq!(
            Destination::from(PathBuf::from("a.svg")),
            Destination::File(PathBuf::from("a.svg"))
        );
    }

    #[test]
    fn test_vector_file_name() {
        assert_eq!(
            vector_file_name(Path::new("art/ship.png")),
            Some(PathBuf::from("ship.svg"))
        );
        // Only the extension is replaced, not every "png" in the name
        assert_eq!(
            vector_file_name(Path::new("png_pngs.png")),
            Some(PathBuf::from("png_pngs.svg"))
        );
        assert_eq!(vector_file_name(Path::new("")), None);
    }

    #[test]
    fn test_sibling_vector_path() {
        assert_eq!(
            sibling_vector_path(Path::new("art/ship.png")),
            PathBuf::from("art/ship.svg")
        );
    }

    #[test]
    fn test_is_raster_path() {
        assert!(is_raster_path(Path::new("a.png")));
        assert!(is_raster_path(Path::new("a.PNG")));
        assert!(!is_raster_path(Path::new("a.svg")));
        assert!(!is_raster_path(Path::new("notes.txt")));
        assert!(!is_raster_path(Path::new("README")));
    }
}
