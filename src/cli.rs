//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for clickgen using clap's derive macros.

use clap::{Parser, Subcommand};

use crate::config::{Platform, Preset};

/// clickgen - synthetic click-stream generator for URL-shortener analytics
#[derive(Parser, Debug)]
#[command(name = "clickgen")]
#[command(version)]
#[command(about = "Generate and analyse synthetic URL-shortener click streams", long_about = None)]
pub struct Cli {
    /// Configuration file (default: clickgen.toml, if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the URL catalog and click stream CSV files
    Generate {
        /// Parameter preset (global, europe)
        #[arg(long)]
        preset: Option<Preset>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Number of users
        #[arg(long)]
        users: Option<usize>,

        /// Number of catalog entries
        #[arg(long)]
        urls: Option<usize>,

        /// Number of click events
        #[arg(long)]
        clicks: Option<usize>,

        /// Output directory
        #[arg(long)]
        out_dir: Option<String>,
    },

    /// Analyse previously generated files
    Report {
        /// Catalog CSV path (default: from configuration)
        #[arg(long)]
        catalog: Option<String>,

        /// Event stream CSV path (default: from configuration)
        #[arg(long)]
        events: Option<String>,

        /// Keep only these platforms (repeatable)
        #[arg(long = "platform")]
        platforms: Vec<Platform>,

        /// Keep only these HTTP status codes (repeatable)
        #[arg(long = "status")]
        statuses: Vec<u16>,

        /// Size of the user agent leaderboard and feature preview
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available presets
    Presets,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: clickgen.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
