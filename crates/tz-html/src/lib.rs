//! HTML adapter for the timestamp rewriter.
//!
//! Parses documents with `html5ever` into the [`tz_core::Document`] model and
//! serializes the model back to HTML.
//!
//! # Parsing
//!
//! `html5ever` implements the HTML5 tree construction algorithm, so malformed
//! markup never fails to parse: the result is whatever a browser would build.
//! Documents always come back with `html`, `head` and `body` elements.
//! Processing instructions are dropped and `template` contents are inlined as
//! the element's children.
//!
//! # Serialization
//!
//! Text is escaped except inside raw text elements (`script`, `style`, ...),
//! attribute values are always double-quoted, and void elements get no end
//! tag.

mod parser;
mod serialize;

use thiserror::Error;

pub use parser::{parse_document, read_document};
pub use serialize::{to_html, write_document};

/// HTML input/output errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Reading or writing the underlying stream failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
