//! Parallel build execution.
//!
//! Targets never depend on each other: each one runs its pipeline over its
//! own copy of the token map, formats it and writes one file. They are
//! spread over a rayon pool and every failure is recorded, not just the
//! first.
//!
//! # Example
//!
//! ```ignore
//! use shift::build::{BuildContext, ParallelBuild};
//!
//! let context = BuildContext::new(config, project_root);
//! let result = ParallelBuild::new(context)
//!     .with_jobs(4)  // Use 4 parallel workers
//!     .run()?;
//!
//! println!("Built {} targets in {:?}", result.success_count(), result.total_duration);
//! ```

use crate::build::{discover_token_files, BuildContext, BuildError, BuildResult, TargetResult};
use crate::config::TargetConfig;
use crate::format::{FormatError, FormatOptions};
use crate::models::FlatTokenMap;
use crate::tokens;
use crate::transforms::TransformError;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a single target failed.
#[derive(Debug, Error)]
enum TargetError {
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parallel build executor.
pub struct ParallelBuild {
    /// Build context
    context: BuildContext,
    /// Worker count; `None` uses the global rayon pool
    jobs: Option<usize>,
}

impl ParallelBuild {
    /// Create a new parallel build.
    pub fn new(context: BuildContext) -> Self {
        Self { context, jobs: None }
    }

    /// Set the number of parallel jobs.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs.max(1));
        self
    }

    /// Get the number of parallel jobs.
    pub fn jobs(&self) -> usize {
        self.jobs.unwrap_or_else(rayon::current_num_threads)
    }

    /// Get the build context.
    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Discover and load the token files, then build every target.
    pub fn run(&self) -> Result<BuildResult, BuildError> {
        let files = discover_token_files(&self.context)?;
        if files.is_empty() {
            return Err(BuildError::NoTokenFiles { patterns: self.context.config().tokens.clone() });
        }

        let tokens = tokens::load_all(&files)?;
        info!(files = files.len(), tokens = tokens.len(), "loaded tokens");

        self.run_with_tokens(&tokens)
    }

    /// Build every target from an already-loaded token map.
    pub fn run_with_tokens(&self, tokens: &FlatTokenMap) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        debug!(targets = self.context.config().targets.len(), jobs = self.jobs(), "starting build");

        let results = match self.jobs {
            Some(jobs) => rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()?
                .install(|| self.execute_all(tokens)),
            None => self.execute_all(tokens),
        };

        let mut result = BuildResult::new();
        for target_result in results {
            result.add_result(target_result);
        }
        Ok(result.with_duration(start.elapsed()))
    }

    /// Run all targets; results come back in config order.
    fn execute_all(&self, tokens: &FlatTokenMap) -> Vec<TargetResult> {
        self.context
            .config()
            .targets
            .par_iter()
            .map(|target| self.execute_target(target, tokens))
            .collect()
    }

    /// Execute a single build target.
    fn execute_target(&self, target: &TargetConfig, tokens: &FlatTokenMap) -> TargetResult {
        let start = Instant::now();
        info!(target_name = %target.name, pipeline = %target.pipeline, format = %target.format, "building");

        match self.build_target(target, tokens) {
            Ok(output) => {
                debug!(target_name = %target.name, output = %output.display(), "wrote output");
                TargetResult::success(target.name.clone(), output, tokens.len(), start.elapsed())
            }
            Err(e) => {
                warn!(target_name = %target.name, error = %e, "target failed");
                TargetResult::failed(target.name.clone(), e.to_string(), start.elapsed())
            }
        }
    }

    fn build_target(
        &self,
        target: &TargetConfig,
        tokens: &FlatTokenMap,
    ) -> Result<PathBuf, TargetError> {
        let transformed = self.context.registry().apply(&target.pipeline, tokens)?;

        let options = FormatOptions { pretty: target.pretty };
        let text = target.format.formatter().format(
            &transformed,
            self.context.themes_for(target),
            &options,
        )?;

        let path = self.context.output_path(target);
        let write = |path: &PathBuf| -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, text.as_bytes())
        };
        write(&path).map_err(|source| TargetError::Write { path: path.clone(), source })?;

        Ok(path)
    }
}
