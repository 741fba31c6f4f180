//! Configuration schema types for `shift.toml`
//!
//! Defines the structure and validation rules for a token build.
//!
//! ```toml
//! tokens = ["tokens/**/*.json"]
//!
//! [project]
//! name = "design-system"
//! out = "dist"
//!
//! [themes]
//! dark = '[data-theme="dark"]'
//!
//! [pipelines]
//! "web/hex8" = ["color/css", "color/hex8rgba", "dimension/px"]
//!
//! [[targets]]
//! name = "web"
//! pipeline = "web"
//! format = "typescript"
//! output = "tokens.ts"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use crate::format::FormatKind;
use crate::models::ThemeConfig;
use crate::registry::TransformRegistry;

/// Project metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,
    /// Build output directory
    #[serde(default = "default_out")]
    pub out: PathBuf,
}

fn default_out() -> PathBuf {
    PathBuf::from("build")
}

fn default_tokens() -> Vec<String> {
    vec!["tokens/**/*.json".to_string()]
}

fn default_pipeline() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

/// One output file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Target name, unique within the config
    pub name: String,
    /// Pipeline to run before formatting
    #[serde(default = "default_pipeline")]
    pub pipeline: String,
    /// Output format
    pub format: FormatKind,
    /// Output file, relative to `project.out`
    pub output: PathBuf,
    /// Emit theme overrides
    #[serde(default = "default_true")]
    pub themes: bool,
    /// Pretty print output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

/// Complete shift.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftConfig {
    /// Project metadata (required)
    pub project: ProjectConfig,
    /// Glob patterns for token files, relative to the project root
    #[serde(default = "default_tokens")]
    pub tokens: Vec<String>,
    /// Theme name to selector
    #[serde(default)]
    pub themes: ThemeConfig,
    /// Extra pipelines, added to (or replacing) the presets
    #[serde(default)]
    pub pipelines: BTreeMap<String, Vec<String>>,
    /// Output targets
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "targets.web.pipeline")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shift.toml: '{}' {}", self.field, self.message)
    }
}

impl ShiftConfig {
    /// Built-in registry plus the pipelines defined in this config.
    pub fn registry(&self) -> TransformRegistry {
        let mut registry = TransformRegistry::with_builtins();
        for (name, steps) in &self.pipelines {
            registry.define(name.as_str(), steps.iter().map(String::as_str));
        }
        registry
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut error = |field: String, message: &str| {
            errors.push(ConfigValidationError { field, message: message.to_string() });
        };

        if self.project.name.is_empty() {
            error("project.name".to_string(), "must be a non-empty string");
        }

        if self.tokens.is_empty() {
            error("tokens".to_string(), "must contain at least one glob pattern");
        }

        let registry = self.registry();
        for (name, steps) in &self.pipelines {
            for step in steps {
                if !registry.has_transform(step) {
                    error(format!("pipelines.{}", name), &format!("unknown transform '{}'", step));
                }
            }
        }

        if self.targets.is_empty() {
            error("targets".to_string(), "must define at least one target");
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if target.name.is_empty() {
                error("targets.name".to_string(), "must be a non-empty string");
            } else if !seen.insert(target.name.as_str()) {
                error(format!("targets.{}", target.name), "is defined more than once");
            }
            if !registry.contains(&target.pipeline) {
                error(
                    format!("targets.{}.pipeline", target.name),
                    &format!("unknown pipeline '{}'", target.pipeline),
                );
            }
            if target.output.as_os_str().is_empty() {
                error(format!("targets.{}.output", target.name), "must be a file path");
            }
        }

        errors
    }

    /// Look up a target by name.
    pub fn target(&self, name: &str) -> Option<&TargetConfig> {
        self.targets.iter().find(|t| t.name == name)
    }
}
