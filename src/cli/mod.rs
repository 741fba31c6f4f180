//! Command-line interface implementation
//!
//! This module provides the CLI definition and dispatches to submodules
//! for specific command implementations.

mod build;
mod info;
mod transform;

use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{find_config_from, load_config_file, ConfigError};
use crate::format::FormatKind;
use crate::registry::TransformRegistry;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Shift - transform resolved design tokens and generate code
#[derive(Parser)]
#[command(name = "shift")]
#[command(about = "Shift - transform resolved design tokens into JSON, TypeScript and CSS")]
#[command(version)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every target in shift.toml
    Build {
        /// Path to shift.toml (default: search from the current directory upward)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the output directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Build only this target
        #[arg(short, long)]
        target: Option<String>,

        /// Number of parallel jobs (default: number of CPUs)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Run one pipeline over token files and print or write the result
    Transform {
        /// Token files (.json or .json5)
        #[arg(required = true)]
        tokens: Vec<PathBuf>,

        /// Pipeline to apply
        #[arg(short, long, default_value = "default")]
        pipeline: String,

        /// Include pipelines from this shift.toml (default: search upward, if any)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: json, typescript (ts) or css
        #[arg(short, long, default_value = "json")]
        format: FormatKind,

        /// Theme to emit, as name=selector (repeatable)
        #[arg(long = "theme", value_name = "NAME=SELECTOR", value_parser = parse_theme)]
        themes: Vec<(String, String)>,

        /// Compact output
        #[arg(long)]
        compact: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List every pipeline and its steps
    Pipelines {
        /// Include pipelines from this shift.toml (default: search upward, if any)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Parse `name=selector`.
fn parse_theme(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, selector)) if !name.trim().is_empty() && !selector.trim().is_empty() => {
            Ok((name.trim().to_string(), selector.trim().to_string()))
        }
        _ => Err(format!("expected NAME=SELECTOR, got '{}'", s)),
    }
}

/// Presets plus the pipelines of `config`, or of a shift.toml found above
/// `cwd`. Presets alone when neither exists.
pub(crate) fn load_registry(
    config: Option<&Path>,
    cwd: &Path,
) -> Result<TransformRegistry, ConfigError> {
    let config_path = match config {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_from(cwd.to_path_buf()),
    };
    match config_path {
        Some(path) => Ok(load_config_file(&path)?.registry()),
        None => Ok(TransformRegistry::with_builtins()),
    }
}

/// Default log filter for a `-v` count.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Commands::Build { config, out, target, jobs } => {
            build::run_build(config.as_deref(), out, target, jobs)
        }
        Commands::Transform { tokens, pipeline, config, format, themes, compact, output } => {
            transform::run_transform(
                &tokens,
                &pipeline,
                config.as_deref(),
                format,
                themes,
                !compact,
                output.as_deref(),
            )
        }
        Commands::Pipelines { config } => info::run_pipelines(config.as_deref()),
    }
}
