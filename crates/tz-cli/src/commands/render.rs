//! Render command for formatting a single timestamp.

use std::io::Write;

use anyhow::{Result, bail};
use tz_core::{Render, TimestampPattern};

use crate::Config;
use crate::commands::util;

/// Prints the rendering of one machine-readable timestamp.
pub fn run<W: Write>(writer: &mut W, config: &Config, timestamp: &str) -> Result<()> {
    if !TimestampPattern::new().is_exact_match(timestamp) {
        bail!("not a machine-readable timestamp: {timestamp:?} (expected e.g. 2024-02-08T20:03:14Z)");
    }

    let renderer = util::build_renderer(config)?;
    writeln!(writer, "{}", renderer.render(timestamp))?;
    Ok(())
}
