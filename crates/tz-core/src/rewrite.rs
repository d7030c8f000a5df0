//! Locating timestamps in a content tree and rewriting them in place.
//!
//! The rewriter walks the tree depth first. At every container it takes the
//! original child list, recurses into element children, and rebuilds the list
//! with each matching text leaf replaced by its segments: plain text for the
//! literal parts and a marker for each timestamp. Replacement nodes are never
//! scanned again in the same pass, and markers from an earlier pass are
//! carried through untouched.

use std::collections::BTreeSet;

use crate::dom::{Element, Node, ParentNode};
use crate::marker::{is_marker, marker_node};
use crate::pattern::{Segment, TimestampPattern};
use crate::render::Render;

/// Elements whose text is raw text in HTML and cannot hold markup.
pub const DEFAULT_OPAQUE_TAGS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "textarea",
    "title", "xmp",
];

#[derive(Debug, Default)]
struct Tally {
    text_nodes: usize,
    rewritten: usize,
    markers: usize,
}

/// Replaces timestamps in text leaves with rendered markers.
#[derive(Debug)]
pub struct Rewriter<R> {
    pattern: TimestampPattern,
    renderer: R,
    opaque_tags: BTreeSet<String>,
}

impl<R: Render> Rewriter<R> {
    /// Creates a rewriter with the default opaque tags.
    pub fn new(renderer: R) -> Self {
        Self {
            pattern: TimestampPattern::new(),
            renderer,
            opaque_tags: DEFAULT_OPAQUE_TAGS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Replaces the set of elements whose text is left alone.
    ///
    /// An empty set rewrites every text leaf in the tree.
    #[must_use]
    pub fn with_opaque_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.opaque_tags = tags
            .into_iter()
            .map(|tag| tag.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    fn is_opaque(&self, tag: &str) -> bool {
        self.opaque_tags.contains(tag) || self.opaque_tags.contains(&tag.to_ascii_lowercase())
    }

    /// Elements whose children are left as they are.
    fn skips(&self, element: &Element) -> bool {
        is_marker(element) || self.is_opaque(&element.tag)
    }

    /// Rewrites every timestamp below `root`. A missing root is a no-op.
    pub fn rewrite<P: ParentNode + ?Sized>(&self, root: Option<&mut P>) {
        let Some(root) = root else {
            tracing::debug!("no root to rewrite");
            return;
        };

        let mut tally = Tally::default();
        self.visit(root.children_mut(), &mut tally);
        tracing::debug!(
            text_nodes = tally.text_nodes,
            rewritten = tally.rewritten,
            markers = tally.markers,
            "rewrite pass complete"
        );
    }

    fn visit(&self, children: &mut Vec<Node>, tally: &mut Tally) {
        let original = std::mem::take(children);
        children.reserve(original.len());

        for child in original {
            match child {
                Node::Element(mut element) => {
                    if !self.skips(&element) {
                        self.visit(&mut element.children, tally);
                    }
                    children.push(Node::Element(element));
                }
                Node::Text(text) => {
                    tally.text_nodes += 1;
                    if self.pattern.is_match(&text) {
                        let replacement = self.replacement_nodes(&text);
                        tally.rewritten += 1;
                        tally.markers += replacement
                            .iter()
                            .filter(|node| matches!(node, Node::Element(_)))
                            .count();
                        children.extend(replacement);
                    } else {
                        children.push(Node::Text(text));
                    }
                }
                other => children.push(other),
            }
        }
    }

    /// The ordered nodes that replace a text leaf holding `text`.
    ///
    /// Empty literals are dropped, so `""` yields no nodes at all.
    pub fn replacement_nodes(&self, text: &str) -> Vec<Node> {
        self.pattern
            .split(text)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Timestamp(original) => Some(marker_node(&self.renderer, original)),
                Segment::Literal("") => None,
                Segment::Literal(literal) => Some(Node::text(literal)),
            })
            .collect()
    }

    /// Lists the timestamps the rewriter would replace, in document order.
    pub fn locate<'d, P: ParentNode + ?Sized>(&self, root: &'d P) -> Vec<&'d str> {
        let mut found = Vec::new();
        self.locate_in(root.children(), &mut found);
        found
    }

    fn locate_in<'d>(&self, children: &'d [Node], found: &mut Vec<&'d str>) {
        for child in children {
            match child {
                Node::Element(element) if !self.skips(element) => {
                    self.locate_in(&element.children, found);
                }
                Node::Text(text) => found.extend(self.pattern.find_iter(text)),
                _ => {}
            }
        }
    }
}
