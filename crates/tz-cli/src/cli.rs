//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tz_core::Zone;

/// Rewrite machine-readable timestamps into the reader's local time.
///
/// Finds `YYYY-MM-DDTHH:MM:SSZ` timestamps in the text of an HTML document
/// and replaces each one with a marked-up, locale-formatted rendering that
/// keeps the original value as a hover title.
#[derive(Debug, Parser)]
#[command(name = "tzmark", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rewrite every timestamp in an HTML document.
    Rewrite {
        /// Input file. Reads stdin when omitted or `-`.
        input: Option<PathBuf>,

        /// Output file. Writes stdout when omitted or `-`.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a single timestamp.
    Render {
        /// A machine-readable timestamp (e.g., 2024-02-08T20:03:14Z).
        timestamp: String,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// List the timestamps a rewrite would replace.
    Scan {
        /// Input file. Reads stdin when omitted or `-`.
        input: Option<PathBuf>,

        /// Output JSON lines instead of tab-separated text.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        render: RenderArgs,
    },
}

/// Rendering options that override the configuration file.
#[derive(Debug, Clone, Default, Args)]
pub struct RenderArgs {
    /// Locale for month and day names (e.g., `en_US`, `fr_FR`, `POSIX`).
    #[arg(long)]
    pub locale: Option<String>,

    /// Display zone: `local`, `utc`, or an offset like +05:30.
    #[arg(long, allow_hyphen_values = true)]
    pub zone: Option<Zone>,

    /// Name shown after the offset (e.g., Europe/Berlin).
    #[arg(long)]
    pub zone_label: Option<String>,

    /// strftime-style date/time format (e.g., "%x %X").
    #[arg(long)]
    pub format: Option<String>,
}
