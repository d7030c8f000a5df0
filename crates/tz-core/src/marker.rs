//! Marker elements that stand in for rewritten timestamps.

use crate::dom::{Element, Node};
use crate::render::Render;

pub const MARKER_TAG: &str = "span";

/// Marks the element as a date for styling and assistive tooling.
pub const DATE_CLASS: &str = "date";

/// Marks the date as one rewritten from the ISO pattern.
pub const REWRITTEN_CLASS: &str = "iso-rewritten";

/// Attribute holding the original machine-readable value, shown on hover.
pub const ORIGINAL_ATTR: &str = "title";

/// Builds the marker for one matched timestamp.
pub fn marker_node<R: Render + ?Sized>(renderer: &R, original: &str) -> Node {
    Element::new(MARKER_TAG)
        .with_attr("class", format!("{DATE_CLASS} {REWRITTEN_CLASS}"))
        .with_attr(ORIGINAL_ATTR, original)
        .with_child(Node::text(renderer.render(original)))
        .into()
}

/// Whether `element` is a marker left by an earlier rewrite.
pub fn is_marker(element: &Element) -> bool {
    element.tag == MARKER_TAG
        && element.has_class(DATE_CLASS)
        && element.has_class(REWRITTEN_CLASS)
        && element.attr(ORIGINAL_ATTR).is_some()
}

/// Returns the original timestamp if `node` is a marker.
pub fn marker_original(node: &Node) -> Option<&str> {
    let element = node.as_element()?;
    if is_marker(element) {
        element.attr(ORIGINAL_ATTR)
    } else {
        None
    }
}
