//! Transform command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::info;

use super::{load_registry, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::format::{FormatKind, FormatOptions};
use crate::models::ThemeConfig;
use crate::tokens;

/// Apply one pipeline to token files and format the result.
///
/// The pipeline may be a preset or one defined in `config` (or a discovered
/// shift.toml). Writes to `output` when given, stdout otherwise.
pub fn run_transform(
    files: &[PathBuf],
    pipeline: &str,
    config: Option<&Path>,
    format: FormatKind,
    themes: Vec<(String, String)>,
    pretty: bool,
    output: Option<&Path>,
) -> ExitCode {
    let cwd = std::env::current_dir().unwrap_or_default();
    let registry = match load_registry(config, &cwd) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    if !registry.contains(pipeline) {
        eprintln!("Error: unknown pipeline: {}", pipeline);
        eprintln!("Available pipelines: {}", registry.pipelines().join(", "));
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let tokens = match tokens::load_all(files) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    info!(files = files.len(), tokens = tokens.len(), pipeline, "transforming");

    let transformed = match registry.apply(pipeline, &tokens) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let themes: ThemeConfig = themes.into_iter().collect();
    let themes = (!themes.is_empty()).then_some(&themes);
    let text = match format.formatter().format(&transformed, themes, &FormatOptions { pretty }) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &text) {
                eprintln!("Error: failed to write {}: {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
            info!(output = %path.display(), "wrote output");
        }
        None => print!("{}", text),
    }
    ExitCode::from(EXIT_SUCCESS)
}
