//! Build command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::info;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::build::{BuildContext, ParallelBuild};
use crate::config::{load_config, merge_cli_overrides, project_root, CliOverrides};

/// Run the build command
pub fn run_build(
    config: Option<&Path>,
    out: Option<PathBuf>,
    target: Option<String>,
    jobs: Option<usize>,
) -> ExitCode {
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("Error: cannot read current directory: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (mut config, config_path) = match load_config(config, &cwd) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    info!(config = %config_path.display(), "using config");

    let overrides = CliOverrides { out, target, jobs };
    if let Err(e) = merge_cli_overrides(&mut config, &overrides) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let context = BuildContext::new(config, project_root(&config_path).to_path_buf());
    let mut build = ParallelBuild::new(context);
    if let Some(jobs) = overrides.jobs {
        build = build.with_jobs(jobs);
    }

    match build.run() {
        Ok(result) => {
            if result.is_success() {
                println!("{}", result.summary());
                ExitCode::from(EXIT_SUCCESS)
            } else {
                eprintln!("{}", result.summary());
                ExitCode::from(EXIT_ERROR)
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
