//! Configuration loading and discovery for `shift.toml`
//!
//! Provides functions to find, load, and override configuration.

use super::schema::ShiftConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for by [`find_config_from`].
pub const CONFIG_FILE: &str = "shift.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No shift.toml found
    #[error("no {CONFIG_FILE} found in {} or any parent directory", .0.display())]
    NotFound(PathBuf),
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse shift.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Build a single target only
    pub target: Option<String>,
    /// Number of parallel jobs; not stored in the config
    pub jobs: Option<usize>,
}

/// Find shift.toml by walking up from a directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from an explicit path, or discover it from `cwd`.
pub fn load_config(path: Option<&Path>, cwd: &Path) -> Result<(ShiftConfig, PathBuf), ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => find_config_from(cwd.to_path_buf())
            .ok_or_else(|| ConfigError::NotFound(cwd.to_path_buf()))?,
    };
    let config = load_config_file(&config_path)?;
    Ok((config, config_path))
}

/// Load and validate configuration from a specific file path.
pub fn load_config_file(path: &Path) -> Result<ShiftConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate configuration text.
pub fn parse_config(contents: &str) -> Result<ShiftConfig, ConfigError> {
    let config: ShiftConfig = toml::from_str(contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. A target filter
/// naming an unknown target is a validation error.
pub fn merge_cli_overrides(
    config: &mut ShiftConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(ref out) = overrides.out {
        config.project.out = out.clone();
    }

    if let Some(ref name) = overrides.target {
        if config.target(name).is_none() {
            return Err(ConfigError::Validation(vec![format!("unknown target '{}'", name)]));
        }
        config.targets.retain(|t| &t.name == name);
    }

    Ok(())
}

/// Get the project root directory from a config file path.
pub fn project_root(config_path: &Path) -> &Path {
    config_path.parent().unwrap_or_else(|| Path::new("."))
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    const CONFIG: &[u8] = b"[project]\nname = \"test\"\n\n[[targets]]\nname = \"web\"\nformat = \"json\"\noutput = \"tokens.json\"\n\n[[targets]]\nname = \"ios\"\npipeline = \"ios\"\nformat = \"json\"\noutput = \"ios.json\"\n";

    fn write_config(dir: &Path) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(CONFIG)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path());
        assert_eq!(find_config_from(temp.path().to_path_buf()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path());

        let subdir = temp.path().join("tokens").join("core");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        assert_eq!(find_config_from(subdir), Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_config_from(temp.path().to_path_buf()), None);
    }

    #[test]
    fn test_load_config_discovers_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path());

        let (config, found) = load_config(None, temp.path()).expect("should load");
        assert_eq!(found, config_path);
        assert_eq!(config.project.name, "test");
        assert_eq!(config.targets.len(), 2);
    }

    #[test]
    fn test_load_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        let err = load_config(None, temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_parse_config_invalid_toml() {
        assert!(matches!(parse_config("[project"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_parse_config_validation_error() {
        let err = parse_config("[project]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("  - shift.toml: 'targets'"));
    }

    #[test]
    fn test_merge_overrides() {
        let mut config =
            parse_config(std::str::from_utf8(CONFIG).unwrap()).expect("should parse");
        let overrides =
            CliOverrides {
            out: Some(PathBuf::from("dist")),
            target: Some("ios".to_string()),
            jobs: None,
        };
        merge_cli_overrides(&mut config, &overrides).expect("should merge");

        assert_eq!(config.project.out, PathBuf::from("dist"));
        assert_eq!(config.targets.len(), 1);
        assert_eq!(config.targets[0].name, "ios");
    }

    #[test]
    fn test_merge_unknown_target() {
        let mut config =
            parse_config(std::str::from_utf8(CONFIG).unwrap()).expect("should parse");
        let overrides = CliOverrides { target: Some("android".to_string()), ..Default::default() };
        assert!(merge_cli_overrides(&mut config, &overrides).is_err());
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/project");
        assert_eq!(resolve_path(root, Path::new("dist")), PathBuf::from("/project/dist"));
        assert_eq!(resolve_path(root, Path::new("/abs")), PathBuf::from("/abs"));
        assert_eq!(project_root(Path::new("/project/shift.toml")), root);
    }
}
