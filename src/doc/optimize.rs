// src/doc/optimize.rs

//! Size optimizations applied to the element tree before compact rendering.
//!
//! None of the passes changes what the document looks like when rendered:
//!
//! 1. [`group_by_fill`] nests rectangles sharing a fill under one `<g fill>`,
//!    so the fill is written once per color instead of once per rectangle.
//! 2. [`drop_zero_attributes`] removes `x`, `y`, `width` and `height`
//!    attributes equal to `0`, which is their default.
//! 3. [`substitute_color_keywords`] replaces hex fills that have a shorter
//!    named keyword (`#f00` → `red`).
//!
//! Whitespace between tags, newlines and the space before `/>` are never
//! produced by the compact renderer in the first place.

use crate::doc::color::{color_keyword, lengthen_black};
use crate::doc::svg_document::Node;
use log::debug;
use std::collections::HashMap;

const GEOMETRY_ATTRIBUTES: [&str; 4] = ["x", "y", "width", "height"];

/// Runs every pass in order.
pub fn optimize(root: &mut Node) {
    group_by_fill(root);
    drop_zero_attributes(root);
    substitute_color_keywords(root);
}

/// Groups the fill-bearing children of `root` by fill color.
///
/// Colors are kept in order of first appearance. A color used by more than
/// one element becomes a `<g>` carrying the shared fill, with the fill removed
/// from its members; a color used once stays a plain element. All groups are
/// placed where the first fill-bearing child was; children without a fill
/// keep their positions.
pub fn group_by_fill(root: &mut Node) {
    let mut buckets: Vec<(String, Vec<Node>)> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();
    let mut layout: Vec<Option<Node>> = Vec::with_capacity(root.children.len());
    let mut groups_slot = None;

    for mut child in root.children.drain(..) {
        let Some(fill) = child.attr("fill").map(|f| lengthen_black(f).to_string()) else {
            layout.push(Some(child));
            continue;
        };
        child.set_attr("fill", &fill);
        if groups_slot.is_none() {
            groups_slot = Some(layout.len());
            layout.push(None);
        }
        let idx = *index_of.entry(fill.clone()).or_insert_with(|| {
            buckets.push((fill, Vec::new()));
            buckets.len() - 1
        });
        buckets[idx].1.push(child);
    }

    let grouped = buckets.iter().filter(|(_, members)| members.len() > 1).count();
    debug!(
        "Grouping {} fill colors ({} shared by several elements)",
        buckets.len(),
        grouped
    );

    let mut groups = Vec::with_capacity(buckets.len());
    for (fill, mut members) in buckets {
        if members.len() == 1 {
            groups.append(&mut members);
            continue;
        }
        for member in &mut members {
            member.remove_attr("fill");
        }
        let mut group = Node::new("g").with_attr("fill", fill);
        group.children = members;
        groups.push(group);
    }

    let mut groups = Some(groups);
    for (pos, slot) in layout.into_iter().enumerate() {
        match slot {
            Some(node) => root.children.push(node),
            None if Some(pos) == groups_slot => {
                root.children.extend(groups.take().into_iter().flatten())
            }
            None => {}
        }
    }
}

/// Removes geometry attributes whose value is `0`.
pub fn drop_zero_attributes(root: &mut Node) {
    root.walk_mut(&mut |node| {
        node.attributes
            .retain(|a| !(a.value == "0" && GEOMETRY_ATTRIBUTES.contains(&a.name)));
    });
}

/// Replaces fills that have a named keyword shorter than the hex form.
pub fn substitute_color_keywords(root: &mut Node) {
    root.walk_mut(&mut |node| {
        for attr in &mut node.attributes {
            if attr.name != "fill" {
                continue;
            }
            if let Some(keyword) = color_keyword(&attr.value) {
                attr.value = keyword.to_string();
            }
        }
    });
}
