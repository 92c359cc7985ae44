// src/doc/color.rs

//! Fill color strings: full hex, quantized short hex, highlight, and the
//! named-color keywords that are shorter than their hex spelling.

use crate::image::image_formats::Rgba;

/// Fill used for merged rectangles when highlighting is enabled.
pub const HIGHLIGHT_HEX: &str = "#bb3388";
/// Quantized form of [`HIGHLIGHT_HEX`].
pub const HIGHLIGHT_SHORT_HEX: &str = "#b38";

const SHORT_BLACK: &str = "#000";
const LONG_BLACK: &str = "#000000";

/// Hex spellings that have a shorter SVG color keyword.
const COLOR_KEYWORDS: &[(&str, &str)] = &[
    ("#f0ffff", "azure"),
    ("#f5f5dc", "beige"),
    ("#ffe4c4", "bisque"),
    ("#a52a2a", "brown"),
    ("#ff7f50", "coral"),
    ("#ffd700", "gold"),
    ("#808080", "gray"),
    ("#008000", "green"),
    ("#4b0082", "indigo"),
    ("#fffff0", "ivory"),
    ("#f0e68c", "khaki"),
    ("#faf0e6", "linen"),
    ("#800000", "maroon"),
    ("#000080", "navy"),
    ("#808000", "olive"),
    ("#ffa500", "orange"),
    ("#da70d6", "orchid"),
    ("#cd853f", "peru"),
    ("#ffc0cb", "pink"),
    ("#dda0dd", "plum"),
    ("#800080", "purple"),
    ("#f00", "red"),
    ("#fa8072", "salmon"),
    ("#a0522d", "sienna"),
    ("#c0c0c0", "silver"),
    ("#fffafa", "snow"),
    ("#d2b48c", "tan"),
    ("#008080", "teal"),
    ("#ff6347", "tomato"),
    ("#ee82ee", "violet"),
    ("#f5deb3", "wheat"),
];

/// `#rrggbb`
pub fn hex_color(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// `#rgb` built from the high nibble of each channel (truncated, not rounded).
///
/// ```
/// use pixel_svg::doc::color::quantized_hex;
/// assert_eq!(quantized_hex(171, 205, 239), "#ace");
/// ```
pub fn quantized_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:x}{:x}{:x}", r >> 4, g >> 4, b >> 4)
}

/// Quantized black is always written in its six-digit form.
// TODO: check whether current target renderers still mishandle "#000" and drop this if not.
pub fn lengthen_black(fill: &str) -> &str {
    if fill == SHORT_BLACK { LONG_BLACK } else { fill }
}

/// The named keyword for a hex fill, if the table has one.
pub fn color_keyword(fill: &str) -> Option<&'static str> {
    COLOR_KEYWORDS
        .iter()
        .find(|(hex, _)| *hex == fill)
        .map(|(_, name)| *name)
}

/// Parses a fill value as written by this crate: `#rgb`, `#rrggbb`, or one of
/// the keywords substituted during optimization.
pub fn parse_fill(fill: &str) -> Option<[u8; 3]> {
    if let Some((hex, _)) = COLOR_KEYWORDS.iter().find(|(_, name)| *name == fill) {
        return parse_fill(hex);
    }
    let digits = fill.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in rgb.iter_mut().enumerate() {
                *c = channel(&digits[i..i + 1])? * 0x11;
            }
            Some(rgb)
        }
        6 => Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ]),
        _ => None,
    }
}

/// How rectangle colors are spelled in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillPolicy {
    /// Write `#rgb` instead of `#rrggbb`, limiting output to 4096 colors.
    pub quantize: bool,
    /// Paint rectangles that grew beyond 1×1 in the highlight color.
    pub highlight_merged: bool,
}

impl FillPolicy {
    pub fn new(quantize: bool, highlight_merged: bool) -> Self {
        Self {
            quantize,
            highlight_merged,
        }
    }

    /// Fill string for a painted rectangle.
    pub fn fill_for(&self, color: Rgba, merged: bool) -> String {
        match (self.highlight_merged && merged, self.quantize) {
            (true, true) => HIGHLIGHT_SHORT_HEX.to_string(),
            (true, false) => HIGHLIGHT_HEX.to_string(),
            (false, true) => quantized_hex(color.r, color.g, color.b),
            (false, false) => hex_color(color.r, color.g, color.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color(255, 0, 0), "#ff0000");
        assert_eq!(hex_color(1, 2, 3), "#010203");
    }

    #[test]
    fn test_quantized_hex_truncates() {
        assert_eq!(quantized_hex(171, 205, 239), "#ace");
        assert_eq!(quantized_hex(15, 16, 255), "#01f");
        assert_eq!(quantized_hex(0, 0, 0), "#000");
    }

    #[test]
    fn test_lengthen_black_only() {
        assert_eq!(lengthen_black("#000"), "#000000");
        assert_eq!(lengthen_black("#001"), "#001");
        assert_eq!(lengthen_black("#000000"), "#000000");
    }

    #[test]
    fn test_color_keyword() {
        assert_eq!(color_keyword("#f00"), Some("red"));
        assert_eq!(color_keyword("#808080"), Some("gray"));
        assert_eq!(color_keyword("#ff0000"), None);
        assert_eq!(color_keyword("#f00abc"), None);
    }

    #[test]
    fn test_parse_fill() {
        assert_eq!(parse_fill("#ff0000"), Some([255, 0, 0]));
        assert_eq!(parse_fill("#ace"), Some([0xaa, 0xcc, 0xee]));
        assert_eq!(parse_fill("red"), Some([255, 0, 0]));
        assert_eq!(parse_fill("teal"), Some([0, 128, 128]));
        assert_eq!(parse_fill("#12"), None);
        assert_eq!(parse_fill("#gg0000"), None);
        assert_eq!(parse_fill("blue"), None);
    }

    #[test]
    fn test_fill_policy() {
        let c = Rgba::opaque(171, 205, 239);
        assert_eq!(FillPolicy::new(false, false).fill_for(c, true), "#abcdef");
        assert_eq!(FillPolicy::new(true, false).fill_for(c, true), "#ace");
        assert_eq!(FillPolicy::new(false, true).fill_for(c, true), HIGHLIGHT_HEX);
        assert_eq!(FillPolicy::new(true, true).fill_for(c, true), HIGHLIGHT_SHORT_HEX);
        // Single pixels keep their own color even when highlighting
        assert_eq!(FillPolicy::new(false, true).fill_for(c, false), "#abcdef");
        assert_eq!(FillPolicy::new(true, true).fill_for(c, false), "#ace");
    }
}
