//! Rewrite command: one rewrite pass over an HTML document.

use std::io::Write;

use anyhow::{Context, Result};

use crate::Config;
use crate::commands::util;

/// Parses `html`, rewrites every timestamp, and writes the result.
pub fn run<W: Write>(html: &str, writer: &mut W, config: &Config) -> Result<()> {
    let rewriter = util::build_rewriter(config)?;

    let mut document = tz_html::parse_document(html);
    rewriter.rewrite(Some(&mut document));

    tz_html::write_document(writer, &document).context("failed to write HTML output")?;
    Ok(())
}
