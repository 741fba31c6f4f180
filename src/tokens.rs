//! Loading and validating flat token maps.
//!
//! A token file holds already-resolved tokens in one of two shapes:
//!
//! ```json
//! { "colors.bg": { "path": "colors.bg", "rawPath": ["colors", "bg"], "type": "color", "value": "#fff" } }
//! ```
//!
//! or an array of the same token objects, keyed by their joined raw path.
//! Strict JSON is tried first so integers keep their exact form; JSON5 is the
//! fallback for hand-written files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{token_map, FlatTokenMap, ResolvedToken};

/// Errors that can occur while loading token files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TokenError {
    /// File I/O error
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Neither JSON nor JSON5 could parse the file
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    /// A token has no path segments
    #[error("token '{0}' has an empty rawPath")]
    EmptyPath(String),
    /// Two tokens nest to the same place
    #[error("tokens '{first}' and '{second}' share rawPath {raw_path}")]
    DuplicatePath { first: String, second: String, raw_path: String },
    /// One token's path is nested under another token's value
    #[error("token '{child}' is nested under token '{parent}'")]
    NestedUnderToken { parent: String, child: String },
    /// The same key appears in two sources being merged
    #[error("token '{0}' is defined in more than one source")]
    DuplicateKey(String),
}

pub type Result<T> = std::result::Result<T, TokenError>;

#[derive(Deserialize)]
#[serde(untagged)]
enum TokenFile {
    Map(FlatTokenMap),
    List(Vec<ResolvedToken>),
}

impl From<TokenFile> for FlatTokenMap {
    fn from(file: TokenFile) -> Self {
        match file {
            TokenFile::Map(map) => map,
            TokenFile::List(list) => token_map(list),
        }
    }
}

/// Parse token file contents. `source` only labels errors.
pub fn parse_tokens(content: &str, source: &Path) -> Result<FlatTokenMap> {
    let file: TokenFile = match serde_json::from_str(content) {
        Ok(file) => file,
        Err(json_err) => json5::from_str(content).map_err(|json5_err| TokenError::Parse {
            path: source.to_path_buf(),
            message: format!("{} (as JSON5: {})", json_err, json5_err),
        })?,
    };
    let map = FlatTokenMap::from(file);
    validate(&map)?;
    Ok(map)
}

/// Load and validate a single token file.
pub fn load_tokens(path: &Path) -> Result<FlatTokenMap> {
    let content = fs::read_to_string(path)
        .map_err(|source| TokenError::Io { path: path.to_path_buf(), source })?;
    let map = parse_tokens(&content, path)?;
    debug!(path = %path.display(), tokens = map.len(), "loaded token file");
    Ok(map)
}

/// Load several token files and merge them into one validated map.
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<FlatTokenMap> {
    let maps = paths.iter().map(|p| load_tokens(p.as_ref())).collect::<Result<Vec<_>>>()?;
    let merged = merge(maps)?;
    validate(&merged)?;
    Ok(merged)
}

/// Merge maps, refusing keys that appear in more than one.
pub fn merge(maps: impl IntoIterator<Item = FlatTokenMap>) -> Result<FlatTokenMap> {
    let mut merged = FlatTokenMap::new();
    for map in maps {
        for (key, token) in map {
            if merged.contains_key(&key) {
                return Err(TokenError::DuplicateKey(key));
            }
            merged.insert(key, token);
        }
    }
    Ok(merged)
}

/// Check that every raw path is non-empty and unique, and that no token's
/// path runs through another token.
pub fn validate(tokens: &FlatTokenMap) -> Result<()> {
    let mut owners: HashMap<&[String], &str> = HashMap::new();

    for (key, token) in tokens {
        if token.raw_path.is_empty() {
            return Err(TokenError::EmptyPath(key.clone()));
        }
        if let Some(first) = owners.insert(token.raw_path.as_slice(), key.as_str()) {
            return Err(TokenError::DuplicatePath {
                first: first.to_string(),
                second: key.clone(),
                raw_path: token.raw_path.join("."),
            });
        }
    }

    for (key, token) in tokens {
        for len in 1..token.raw_path.len() {
            if let Some(parent) = owners.get(&token.raw_path[..len]) {
                return Err(TokenError::NestedUnderToken {
                    parent: parent.to_string(),
                    child: key.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ThemeValue, TokenType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn src() -> &'static Path {
        Path::new("tokens.json")
    }

    #[test]
    fn test_parse_map_shape() {
        let json = r##"{
            "colors.bg": {
                "path": "colors.bg", "rawPath": ["colors", "bg"], "type": "color", "value": "#fff",
                "themeValues": { "dark": { "value": "#000" } }
            }
        }"##;
        let map = parse_tokens(json, src()).unwrap();
        let token = &map["colors.bg"];
        assert_eq!(token.token_type, TokenType::Color);
        assert_eq!(token.theme_value("dark"), Some(&ThemeValue::new("#000")));
    }

    #[test]
    fn test_parse_list_shape() {
        let json = r#"[
            { "path": "space.sm", "rawPath": ["space", "sm"], "type": "dimension", "value": 4 },
            { "path": "space.md", "rawPath": ["space", "md"], "type": "dimension", "value": "8" }
        ]"#;
        let map = parse_tokens(json, src()).unwrap();
        assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec!["space.md", "space.sm"]);
        assert!(map["space.sm"].value.is_number());
    }

    #[test]
    fn test_parse_json5_fallback() {
        let json5 = r#"[
            // trailing commas and comments are fine
            { path: 'a', rawPath: ['a'], type: 'string', value: 'x', },
        ]"#;
        let map = parse_tokens(json5, src()).unwrap();
        assert_eq!(map["a"].value.as_str(), Some("x"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_tokens("{ not json", src()).unwrap_err();
        assert!(matches!(err, TokenError::Parse { .. }));
        assert!(err.to_string().contains("tokens.json"));
    }

    #[test]
    fn test_validate_empty_path() {
        let mut map = FlatTokenMap::new();
        map.insert("x".to_string(), ResolvedToken::new::<&str>(&[], "string", "v"));
        assert!(matches!(validate(&map), Err(TokenError::EmptyPath(_))));
    }

    #[test]
    fn test_validate_duplicate_raw_path() {
        let mut map = FlatTokenMap::new();
        map.insert("one".to_string(), ResolvedToken::new(&["a", "b"], "string", "1"));
        map.insert("two".to_string(), ResolvedToken::new(&["a", "b"], "string", "2"));
        match validate(&map) {
            Err(TokenError::DuplicatePath { first, second, .. }) => {
                assert_eq!(first, "one");
                assert_eq!(second, "two");
            }
            other => panic!("expected duplicate path, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_nested_under_token() {
        let map = token_map([
            ResolvedToken::new(&["a"], "string", "1"),
            ResolvedToken::new(&["a", "b"], "string", "2"),
        ]);
        assert!(matches!(validate(&map), Err(TokenError::NestedUnderToken { .. })));
    }

    #[test]
    fn test_merge_rejects_duplicate_keys() {
        let a = token_map([ResolvedToken::new(&["x"], "string", "1")]);
        let b = token_map([ResolvedToken::new(&["x"], "string", "2")]);
        assert!(matches!(merge([a, b]), Err(TokenError::DuplicateKey(k)) if k == "x"));
    }

    #[test]
    fn test_load_all_from_files() {
        let mut first = NamedTempFile::new().unwrap();
        write!(first, r#"[{{"path":"a","rawPath":["a"],"type":"string","value":"1"}}]"#).unwrap();
        let mut second = NamedTempFile::new().unwrap();
        write!(second, r#"[{{"path":"b","rawPath":["b"],"type":"string","value":"2"}}]"#).unwrap();

        let map = load_all(&[first.path(), second.path()]).unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_tokens(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, TokenError::Io { .. }));
    }
}
