// src/image/image_formats.rs

//! In-memory pixel representation.
//!
//! `Rgba` is a plain 4-byte POD so that decoded RGBA8 buffers coming from the
//! `image` crate can be reinterpreted in place with `bytemuck` instead of being
//! copied channel by channel.

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// A single non-premultiplied RGBA pixel with 8-bit components.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    /// A fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    pub const fn transparent() -> Self {
        Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Fully transparent pixels need no rectangle.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(arr: [u8; 4]) -> Self {
        Rgba {
            r: arr[0],
            g: arr[1],
            b: arr[2],
            a: arr[3],
        }
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(p: Rgba) -> Self {
        [p.r, p.g, p.b, p.a]
    }
}

impl From<image::Rgba<u8>> for Rgba {
    fn from(p: image::Rgba<u8>) -> Self {
        Rgba::from(p.0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Reinterprets a raw RGBA8 byte buffer as pixels without copying.
///
/// Returns `None` when the length is not a multiple of four.
pub fn pixels_from_raw(raw: &[u8]) -> Option<&[Rgba]> {
    bytemuck::try_cast_slice(raw).ok()
}
