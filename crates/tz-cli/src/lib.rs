//! tzmark CLI library.
//!
//! This crate provides the CLI interface for rewriting timestamps.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, RenderArgs};
pub use config::Config;
