//! CLI subcommand implementations.

pub mod render;
pub mod rewrite;
pub mod scan;
pub mod util;
