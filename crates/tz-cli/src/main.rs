use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tz_cli::commands::{render, rewrite, scan, util};
use tz_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout carries only the document
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match command {
        Commands::Rewrite {
            input,
            output,
            render: args,
        } => {
            let config = config.with_overrides(args);
            // Read everything before opening the output, which may be the same file
            let html = util::read_input(input.as_deref())?;
            let mut writer = util::open_output(output.as_deref())?;
            rewrite::run(&html, &mut writer, &config)?;
            writer.flush().context("failed to flush output")?;
        }
        Commands::Render {
            timestamp,
            render: args,
        } => {
            let config = config.with_overrides(args);
            render::run(&mut std::io::stdout().lock(), &config, timestamp)?;
        }
        Commands::Scan {
            input,
            json,
            render: args,
        } => {
            let config = config.with_overrides(args);
            let html = util::read_input(input.as_deref())?;
            scan::run(&html, &mut std::io::stdout().lock(), &config, *json)?;
        }
    }

    Ok(())
}
