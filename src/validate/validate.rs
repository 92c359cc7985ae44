//! SVG read-back validation
//!
//! This module rasterizes the documents produced by this crate (`<svg>`, `<g
//! fill>` and `<rect>` elements only) back into a pixel buffer, so that a
//! conversion can be checked against its source image: every visible pixel
//! must come back with its exact color, transparent pixels must stay empty,
//! and no two rectangles may overlap.

use crate::doc::color::parse_fill;
use crate::image::image_formats::Rgba;
use crate::utils::error::{ConvertError, Result};

/// Largest canvas the validator will allocate, in pixels.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 24;

/// A rasterized document.
#[derive(Debug, Clone)]
pub struct RenderedSvg {
    width: u32,
    height: u32,
    pixels: Vec<Option<[u8; 3]>>,
    hits: Vec<u32>,
    rect_count: usize,
}

impl RenderedSvg {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Color painted at a pixel, `None` if no rectangle covers it.
    ///
    /// Panics if the position is outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        assert!(x < self.width && y < self.height, "({x}, {y}) is outside the canvas");
        self.pixels[self.index(x, y)]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn rect_count(&self) -> usize {
        self.rect_count
    }

    /// Number of pixels painted by more than one rectangle.
    pub fn overlapping_pixels(&self) -> usize {
        self.hits.iter().filter(|&&h| h > 1).count()
    }
}

fn invalid(msg: impl Into<String>) -> ConvertError {
    ConvertError::Validation(msg.into())
}

struct Tag<'a> {
    name: &'a str,
    attributes: Vec<(&'a str, &'a str)>,
    closing: bool,
    self_closing: bool,
}

impl<'a> Tag<'a> {
    fn attr(&self, name: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    fn number(&self, name: &str) -> Result<u32> {
        match self.attr(name) {
            None => Ok(0),
            Some(v) => v
                .parse()
                .map_err(|_| invalid(format!("attribute {name}=\"{v}\" is not a number"))),
        }
    }
}

fn parse_tag(content: &str) -> Result<Tag<'_>> {
    let (closing, content) = match content.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, content),
    };
    let (self_closing, content) = match content.strip_suffix('/') {
        Some(rest) => (true, rest),
        None => (false, content),
    };
    let content = content.trim();
    let name_end = content.find(char::is_whitespace).unwrap_or(content.len());
    let name = &content[..name_end];
    if name.is_empty() {
        return Err(invalid("empty tag name"));
    }

    let mut attributes = Vec::new();
    let mut rest = content[name_end..].trim_start();
    while !rest.is_empty() {
        let eq = rest
            .find('=')
            .ok_or_else(|| invalid(format!("malformed attributes in <{name}>")))?;
        let attr_name = rest[..eq].trim();
        let value_part = rest[eq + 1..]
            .strip_prefix('"')
            .ok_or_else(|| invalid(format!("unquoted attribute {attr_name} in <{name}>")))?;
        let close = value_part
            .find('"')
            .ok_or_else(|| invalid(format!("unterminated attribute {attr_name} in <{name}>")))?;
        attributes.push((attr_name, &value_part[..close]));
        rest = value_part[close + 1..].trim_start();
    }

    Ok(Tag {
        name,
        attributes,
        closing,
        self_closing,
    })
}

/// Rasterizes an SVG document written by this crate.
pub fn rasterize_svg(bytes: &[u8]) -> Result<RenderedSvg> {
    let text = std::str::from_utf8(bytes).map_err(|_| invalid("document is not UTF-8"))?;
    let mut canvas: Option<RenderedSvg> = None;
    let mut fills: Vec<Option<&str>> = Vec::new();

    let mut rest = text;
    while let Some(start) = rest.find('<') {
        let end = rest[start..]
            .find('>')
            .ok_or_else(|| invalid("unterminated tag"))?
            + start;
        let content = &rest[start + 1..end];
        rest = &rest[end + 1..];
        if content.starts_with('?') || content.starts_with('!') {
            continue;
        }

        let tag = parse_tag(content)?;
        if tag.closing {
            if tag.name == "g" {
                fills.pop().ok_or_else(|| invalid("unbalanced </g>"))?;
            }
            continue;
        }

        match tag.name {
            "svg" => {
                let width = tag.number("width")?;
                let height = tag.number("height")?;
                let area = u64::from(width) * u64::from(height);
                if area > MAX_CANVAS_PIXELS {
                    return Err(invalid(format!(
                        "canvas {width}x{height} exceeds {MAX_CANVAS_PIXELS} pixels"
                    )));
                }
                let len = area as usize;
                canvas = Some(RenderedSvg {
                    width,
                    height,
                    pixels: vec![None; len],
                    hits: vec![0; len],
                    rect_count: 0,
                });
            }
            "g" => {
                let inherited = fills.last().copied().flatten();
                if !tag.self_closing {
                    fills.push(tag.attr("fill").or(inherited));
                }
            }
            "rect" => {
                let canvas = canvas
                    .as_mut()
                    .ok_or_else(|| invalid("<rect> outside of <svg>"))?;
                let (x, y) = (tag.number("x")?, tag.number("y")?);
                let (w, h) = (tag.number("width")?, tag.number("height")?);
                let fill = tag
                    .attr("fill")
                    .or(fills.last().copied().flatten())
                    .ok_or_else(|| invalid("<rect> without fill"))?;
                let rgb = parse_fill(fill).ok_or_else(|| invalid(format!("unknown fill {fill}")))?;
                let x_end = x.checked_add(w).filter(|&end| end <= canvas.width);
                let y_end = y.checked_add(h).filter(|&end| end <= canvas.height);
                let (Some(x_end), Some(y_end)) = (x_end, y_end) else {
                    return Err(invalid(format!(
                        "rect {w}x{h} at ({x}, {y}) exceeds {}x{} canvas",
                        canvas.width, canvas.height
                    )));
                };
                for py in y..y_end {
                    for px in x..x_end {
                        let i = canvas.index(px, py);
                        canvas.pixels[i] = Some(rgb);
                        canvas.hits[i] = canvas.hits[i].saturating_add(1);
                    }
                }
                canvas.rect_count += 1;
            }
            other => return Err(invalid(format!("unexpected element <{other}>"))),
        }
    }

    if !fills.is_empty() {
        return Err(invalid("unclosed <g>"));
    }
    canvas.ok_or_else(|| invalid("no <svg> element"))
}

/// Checks a lossless conversion (no quantization, no highlighting) against
/// its source pixels.
pub fn validate_conversion(svg: &[u8], width: u32, height: u32, source: &[Rgba]) -> Result<RenderedSvg> {
    let rendered = rasterize_svg(svg)?;
    if rendered.dimensions() != (width, height) {
        return Err(invalid(format!(
            "document is {:?}, source is {width}x{height}",
            rendered.dimensions()
        )));
    }
    let expected_len = width as usize * height as usize;
    if source.len() != expected_len {
        return Err(ConvertError::DimensionMismatch {
            expected: expected_len,
            actual: source.len(),
        });
    }
    let overlaps = rendered.overlapping_pixels();
    if overlaps > 0 {
        return Err(invalid(format!("{overlaps} pixels are painted more than once")));
    }
    for y in 0..height {
        for x in 0..width {
            let expected = source[rendered.index(x, y)];
            let actual = rendered.pixel(x, y);
            let ok = if expected.is_transparent() {
                actual.is_none()
            } else {
                actual == Some(expected.rgb())
            };
            if !ok {
                return Err(invalid(format!(
                    "pixel ({x}, {y}) is {actual:?}, expected {expected}"
                )));
            }
        }
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="3" height="1">"#,
        r##"<g fill="#00ff00"><rect width="1" height="1"/><rect x="2" width="1" height="1"/></g>"##,
        r#"<rect x="1" width="1" height="1" fill="red"/>"#,
        "</svg>"
    );

    #[test]
    fn test_rasterize_groups_and_keywords() {
        let rendered = rasterize_svg(DOC.as_bytes()).unwrap();
        assert_eq!(rendered.dimensions(), (3, 1));
        assert_eq!(rendered.rect_count(), 3);
        assert_eq!(rendered.pixel(0, 0), Some([0, 255, 0]));
        assert_eq!(rendered.pixel(1, 0), Some([255, 0, 0]));
        assert_eq!(rendered.pixel(2, 0), Some([0, 255, 0]));
        assert_eq!(rendered.overlapping_pixels(), 0);
    }

    #[test]
    fn test_overlap_is_counted() {
        let doc = r##"<svg width="2" height="1"><rect width="2" height="1" fill="#fff"/><rect width="1" height="1" fill="#fff"/></svg>"##;
        let rendered = rasterize_svg(doc.as_bytes()).unwrap();
        assert_eq!(rendered.overlapping_pixels(), 1);
    }

    #[test]
    fn test_rect_outside_canvas_is_rejected() {
        let doc = r##"<svg width="1" height="1"><rect width="2" height="1" fill="#fff"/></svg>"##;
        assert!(rasterize_svg(doc.as_bytes()).is_err());
    }

    #[test]
    fn test_rect_position_overflow_is_rejected() {
        let doc = r##"<svg width="2" height="2"><rect x="4294967295" width="2" height="1" fill="#fff"/></svg>"##;
        let err = rasterize_svg(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, ConvertError::Validation(_)));

        let doc = r##"<svg width="2" height="2"><rect y="1" width="1" height="4294967295" fill="#fff"/></svg>"##;
        assert!(matches!(
            rasterize_svg(doc.as_bytes()),
            Err(ConvertError::Validation(_))
        ));
    }

    #[test]
    fn test_oversized_canvas_is_rejected() {
        let doc = r#"<svg width="4294967295" height="4294967295"></svg>"#;
        assert!(matches!(
            rasterize_svg(doc.as_bytes()),
            Err(ConvertError::Validation(_))
        ));
    }

    #[test]
    fn test_short_source_is_dimension_mismatch() {
        let source = [Rgba::opaque(0, 255, 0)];
        let err = validate_conversion(DOC.as_bytes(), 3, 1, &source).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::DimensionMismatch { expected: 3, actual: 1 }
        ));
    }

    #[test]
    fn test_validate_conversion_detects_wrong_color() {
        let source = [
            Rgba::opaque(0, 255, 0),
            Rgba::opaque(255, 0, 0),
            Rgba::opaque(0, 0, 255),
        ];
        let err = validate_conversion(DOC.as_bytes(), 3, 1, &source).unwrap_err();
        assert!(matches!(err, ConvertError::Validation(_)));

        let source = [
            Rgba::opaque(0, 255, 0),
            Rgba::opaque(255, 0, 0),
            Rgba::opaque(0, 255, 0),
        ];
        assert!(validate_conversion(DOC.as_bytes(), 3, 1, &source).is_ok());
    }

    #[test]
    fn test_transparent_pixel_must_stay_empty() {
        let source = [Rgba::opaque(0, 255, 0), Rgba::transparent(), Rgba::opaque(0, 255, 0)];
        assert!(validate_conversion(DOC.as_bytes(), 3, 1, &source).is_err());
    }
}
