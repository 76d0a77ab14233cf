//! CLI interface module
//!
//! This module provides command-line interface functionality for clickgen.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::ClickgenError;
use commands::{ReportArgs, config_generate, list_presets, run_generate, run_report};

#[derive(Debug)]
pub enum CliError {
    /// 库层错误（生成、读取、校验）
    Clickgen(ClickgenError),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::Clickgen(err) => err.format_simple(),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::Clickgen(err) => err.format_colored(),
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<ClickgenError> for CliError {
    fn from(err: ClickgenError) -> Self {
        CliError::Clickgen(err)
    }
}

/// Run a CLI command from clap-parsed input
pub fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    match cmd {
        Commands::Generate {
            preset,
            seed,
            users,
            urls,
            clicks,
            out_dir,
        } => {
            let mut generation = config.generation.clone();
            if let Some(preset) = preset {
                generation.preset = preset;
            }
            if let Some(seed) = seed {
                generation.seed = seed;
            }
            generation.users = users.or(generation.users);
            generation.urls = urls.or(generation.urls);
            generation.clicks = clicks.or(generation.clicks);

            let mut output = config.output.clone();
            if let Some(dir) = out_dir {
                output.dir = dir;
            }
            run_generate(&generation, &output)
        }

        Commands::Report {
            catalog,
            events,
            platforms,
            statuses,
            top,
            json,
        } => run_report(ReportArgs {
            catalog: catalog
                .map(Into::into)
                .unwrap_or_else(|| config.output.catalog_path()),
            events: events
                .map(Into::into)
                .unwrap_or_else(|| config.output.events_path()),
            platforms,
            statuses,
            top,
            json,
        }),

        Commands::Presets => {
            list_presets();
            Ok(())
        }

        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force),
    }
}
