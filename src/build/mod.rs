//! Build orchestration for shift projects
//!
//! Turns a `shift.toml` into output files:
//! - **Discovery**: find token files using the glob patterns from config
//! - **Loading**: merge them into one validated token map
//! - **Execution**: run each target's pipeline and formatter, write the result
//!
//! # Example
//!
//! ```ignore
//! use shift::build::{BuildContext, ParallelBuild};
//! use shift::config::load_config;
//!
//! let (config, path) = load_config(None, &cwd)?;
//! let context = BuildContext::new(config, project_root(&path).to_path_buf());
//! let result = ParallelBuild::new(context).with_jobs(4).run()?;
//!
//! println!("{}", result.summary());
//! ```

pub mod context;
pub mod discovery;
pub mod parallel;
pub mod result;

pub use context::*;
pub use discovery::*;
pub use parallel::*;
pub use result::*;

use thiserror::Error;

use crate::tokens::TokenError;

/// Errors that stop a build before any target runs.
///
/// Per-target failures are not errors; they are recorded in [`BuildResult`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// Glob pattern could not be used
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    /// Token files could not be loaded
    #[error(transparent)]
    Tokens(#[from] TokenError),
    /// No token files matched
    #[error("no token files matched {patterns:?}")]
    NoTokenFiles { patterns: Vec<String> },
    /// Worker pool could not be created
    #[error("failed to start build workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
