//! Scan command for listing the timestamps a rewrite would replace.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tz_core::{Render, parse_instant};

use crate::Config;
use crate::commands::util;

/// One located timestamp.
#[derive(Debug, Serialize)]
struct Located<'a> {
    original: &'a str,
    /// Absent when the match is not a valid instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    instant: Option<DateTime<Utc>>,
    rendered: String,
}

/// Lists every rewritable timestamp in `html`, in document order.
pub fn run<W: Write>(html: &str, writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let rewriter = util::build_rewriter(config)?;
    let document = tz_html::parse_document(html);
    let found = rewriter.locate(&document);

    if found.is_empty() && !json {
        writeln!(writer, "No timestamps found.")?;
        return Ok(());
    }

    for original in found {
        let located = Located {
            original,
            instant: parse_instant(original),
            rendered: rewriter.renderer().render(original),
        };
        if json {
            writeln!(writer, "{}", serde_json::to_string(&located)?)?;
        } else {
            writeln!(writer, "{}\t{}", located.original, located.rendered)?;
        }
    }

    Ok(())
}
