// src/doc/svg_document.rs

//! The SVG element tree built while rectangles are painted.
//!
//! Rectangles are appended as flat `<rect>` children of the root `<svg>`
//! element. Serialization either renders that tree as is, one element per
//! line ([`SvgDocument::render_plain`]), or first runs the size optimizations
//! of [`crate::doc::optimize`] and renders without any insignificant
//! whitespace ([`SvgDocument::to_optimized_bytes`]).

use crate::doc::color::FillPolicy;
use crate::doc::optimize;
use crate::encode::boxes::{ColorBox, Painter};
use crate::image::geom::Rect;
use std::fmt::Write;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A single `name="value"` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub value: String,
}

/// An element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: &'static str,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: &'static str, value: impl ToString) {
        let value = value.to_string();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(pos).value)
    }

    /// Visits this node and all of its descendants, parents first.
    pub fn walk_mut(&mut self, f: &mut dyn FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.walk_mut(f);
        }
    }

    fn write_to(&self, out: &mut String, pretty: bool, depth: usize) {
        if pretty {
            out.push_str(&"  ".repeat(depth));
        }
        out.push('<');
        out.push_str(self.name);
        for attr in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", attr.name, escape(&attr.value));
        }
        if self.children.is_empty() {
            out.push_str(if pretty { " />" } else { "/>" });
        } else {
            out.push('>');
            if pretty {
                out.push('\n');
            }
            for child in &self.children {
                child.write_to(out, pretty, depth + 1);
            }
            if pretty {
                out.push_str(&"  ".repeat(depth));
            }
            let _ = write!(out, "</{}>", self.name);
        }
        if pretty {
            out.push('\n');
        }
    }
}

fn escape(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains(['&', '<', '"']) {
        value
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('"', "&quot;")
            .into()
    } else {
        value.into()
    }
}

/// The document produced for one image.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    root: Node,
    policy: FillPolicy,
}

impl SvgDocument {
    /// Creates an empty `width`×`height` document.
    pub fn new(width: u32, height: u32, policy: FillPolicy) -> Self {
        let root = Node::new("svg")
            .with_attr("xmlns", SVG_NAMESPACE)
            .with_attr("version", "1.1")
            .with_attr("viewBox", format!("0 0 {width} {height}"))
            .with_attr("width", width)
            .with_attr("height", height);
        Self { root, policy }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn policy(&self) -> FillPolicy {
        self.policy
    }

    /// Number of rectangle elements appended so far.
    pub fn rect_count(&self) -> usize {
        self.root.children.iter().filter(|n| n.name == "rect").count()
    }

    /// Appends a `<rect>` element.
    pub fn add_rect(&mut self, rect: &Rect, fill: String) {
        let node = Node::new("rect")
            .with_attr("x", rect.x)
            .with_attr("y", rect.y)
            .with_attr("width", rect.width)
            .with_attr("height", rect.height)
            .with_attr("fill", fill);
        self.root.children.push(node);
    }

    /// Renders the unoptimized document, one element per line.
    pub fn render_plain(&self) -> String {
        let mut out = String::with_capacity(64 + self.root.children.len() * 64);
        out.push_str(XML_DECLARATION);
        out.push('\n');
        self.root.write_to(&mut out, true, 0);
        out
    }

    /// Runs the size optimizations and renders the compact document.
    pub fn to_optimized_bytes(&self) -> Vec<u8> {
        let mut root = self.root.clone();
        optimize::optimize(&mut root);
        let mut out = String::with_capacity(64 + root.children.len() * 48);
        out.push_str(XML_DECLARATION);
        root.write_to(&mut out, false, 0);
        out.into_bytes()
    }
}

impl Painter for SvgDocument {
    fn paint(&mut self, bx: &ColorBox, merged: bool) {
        let fill = self.policy.fill_for(bx.color, merged);
        self.add_rect(&bx.rect, fill);
    }
}
