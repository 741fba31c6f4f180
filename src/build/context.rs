//! Build context containing configuration and state for a build.

use crate::config::{ShiftConfig, TargetConfig};
use crate::models::ThemeConfig;
use crate::registry::TransformRegistry;
use std::path::{Path, PathBuf};

/// Build context containing configuration and paths for a build operation.
///
/// The registry is built once from the config and shared by every target.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// The loaded configuration
    config: ShiftConfig,
    /// Project root directory (where shift.toml is located)
    project_root: PathBuf,
    /// Presets plus config-defined pipelines
    registry: TransformRegistry,
}

impl BuildContext {
    /// Create a new build context.
    pub fn new(config: ShiftConfig, project_root: PathBuf) -> Self {
        let registry = config.registry();
        Self { config, project_root, registry }
    }

    /// Replace the registry, e.g. to add custom transforms.
    pub fn with_registry(mut self, registry: TransformRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &ShiftConfig {
        &self.config
    }

    /// Get the transform registry.
    pub fn registry(&self) -> &TransformRegistry {
        &self.registry
    }

    /// Get the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the output directory (resolved to absolute path).
    pub fn out_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.project.out)
    }

    /// Output file for a target.
    pub fn output_path(&self, target: &TargetConfig) -> PathBuf {
        if target.output.is_absolute() {
            target.output.clone()
        } else {
            self.out_dir().join(&target.output)
        }
    }

    /// Theme config passed to a target's formatter, if the target wants themes.
    pub fn themes_for(&self, target: &TargetConfig) -> Option<&ThemeConfig> {
        target.themes.then_some(&self.config.themes)
    }

    /// Resolve a path relative to the project root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        crate::config::resolve_path(&self.project_root, path)
    }
}
