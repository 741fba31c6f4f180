//! Informational commands

use std::path::Path;
use std::process::ExitCode;

use super::{load_registry, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// List pipelines and their steps, one per line.
///
/// Uses the presets, plus the pipelines from `config` (or a discovered
/// shift.toml) when there is one.
pub fn run_pipelines(config: Option<&Path>) -> ExitCode {
    let cwd = std::env::current_dir().unwrap_or_default();
    let registry = match load_registry(config, &cwd) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let names = registry.pipelines();
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
    for name in names {
        let steps = registry.pipeline(name).unwrap_or_default();
        println!("{:width$}  {}", name, steps.join(" -> "), width = width);
    }
    ExitCode::from(EXIT_SUCCESS)
}
