//! Shared utilities for CLI commands.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tz_core::{LocalizedRenderer, Rewriter};

use crate::Config;

/// Builds the renderer described by the configuration.
pub fn build_renderer(config: &Config) -> Result<LocalizedRenderer> {
    let context = config
        .render_context()
        .context("invalid render configuration")?;
    let renderer = LocalizedRenderer::new(context).context("invalid render configuration")?;
    tracing::debug!(
        locale = %config.locale,
        zone = %config.zone,
        format = %config.format,
        "renderer ready"
    );
    Ok(renderer)
}

/// Builds a rewriter with the configured renderer and opaque tags.
pub fn build_rewriter(config: &Config) -> Result<Rewriter<LocalizedRenderer>> {
    let renderer = build_renderer(config)?;
    Ok(Rewriter::new(renderer).with_opaque_tags(&config.opaque_tags))
}

fn is_stdio(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

/// Reads the whole input, from a file or stdin.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    let mut input = String::new();
    match path {
        Some(p) if !is_stdio(path) => {
            File::open(p)
                .with_context(|| format!("failed to open {}", p.display()))?
                .read_to_string(&mut input)
                .with_context(|| format!("failed to read {}", p.display()))?;
        }
        _ => {
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
        }
    }
    Ok(input)
}

/// Opens the output, a file or stdout.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) if !is_stdio(path) => {
            let file =
                File::create(p).with_context(|| format!("failed to create {}", p.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
