//! Core logic for rewriting machine-readable timestamps.
//!
//! This crate contains:
//! - Pattern: recognizing `YYYY-MM-DD...Z` timestamps in free text
//! - Rendering: formatting an instant for a reader's locale and zone
//! - Rewriting: replacing timestamps in a content tree with marker elements

pub mod dom;
pub mod marker;
pub mod pattern;
pub mod render;
pub mod rewrite;
pub mod zone;

pub use dom::{Document, Element, Node, ParentNode};
pub use marker::{is_marker, marker_node, marker_original};
pub use pattern::{Segment, TimestampPattern};
pub use render::{
    DEFAULT_FORMAT, INVALID_TIMESTAMP, LocalizedRenderer, Render, RenderContext, RenderError,
    parse_instant,
};
pub use rewrite::{DEFAULT_OPAQUE_TAGS, Rewriter};
pub use zone::{Zone, ZoneParseError};
