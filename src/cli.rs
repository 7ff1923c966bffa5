// CLI module - command-line argument parsing and handlers
//
// Provides subcommands next to the default showcase TUI:
// - play: run one scramble session headless
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults

use crate::config::{Config, VERSION};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;

/// scrambler - text that scrambles through random letters and resolves
#[derive(Parser)]
#[command(name = "scrambler")]
#[command(version = VERSION)]
#[command(about = "Scramble-text effects in the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Scramble TEXT once and print the frames
    Play {
        /// The text to resolve to
        text: String,

        /// Seed for reproducible frames
        #[arg(long)]
        seed: Option<u64>,

        /// Print lifecycle events as JSON lines instead of frames
        #[arg(long)]
        json: bool,

        /// Milliseconds between ticks (overrides config)
        #[arg(long)]
        tick_ms: Option<u64>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Handle `config`. Returns an error for unusable paths or failed writes.
pub fn handle_config(show: bool, path: bool, reset: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show();
        Ok(())
    } else if reset {
        handle_config_reset()
    } else {
        println!("Usage: scrambler config [--show|--path|--reset]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
        println!("  --reset   Reset config file to defaults");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush().context("Failed to flush stderr")?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }

    // Config's single source of truth for the file format
    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
