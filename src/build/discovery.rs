//! Token file discovery for the build system.
//!
//! Finds `.json` and `.json5` token files from the glob patterns in the
//! configuration.

use crate::build::BuildContext;
use glob::glob;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Error during token file discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Invalid glob pattern
    #[error("Invalid glob pattern '{0}': {1}")]
    InvalidPattern(String, #[source] glob::PatternError),
}

/// Discover token files matching a glob pattern.
///
/// # Arguments
/// - `base_dir` - Base directory to resolve patterns from
/// - `pattern` - Glob pattern to match
///
/// # Returns
/// Sorted list of matching file paths.
pub fn discover_files(base_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let full_pattern = base_dir.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let paths =
        glob(&pattern_str).map_err(|e| DiscoveryError::InvalidPattern(pattern.to_string(), e))?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() && is_token_file(&path) {
                    files.push(path);
                }
            }
            Err(e) => {
                warn!(error = %e, "error reading path during discovery");
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Check if a path looks like a token file.
fn is_token_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("json") | Some("json5"))
}

/// Discover every token file named by the config, without duplicates.
pub fn discover_token_files(ctx: &BuildContext) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut files = BTreeSet::new();
    for pattern in &ctx.config().tokens {
        files.extend(discover_files(ctx.project_root(), pattern)?);
    }
    Ok(files.into_iter().collect())
}
