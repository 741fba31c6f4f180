//! Output formats for transformed token maps.
//!
//! Every formatter nests tokens by their raw path and writes each token's
//! final value as-is. `alias_of` is never emitted.
//!
//! # Supported Formats
//!
//! - **JSON**: nested object, plus a `$themes` object when overrides exist
//! - **TypeScript**: `export const tokens = {...} as const` (and `themes`)
//! - **CSS**: custom properties under `:root`, one block per theme selector
//!
//! # Example
//!
//! ```
//! use shift::format::format_json;
//! use shift::models::{token_map, ResolvedToken};
//!
//! let tokens = token_map([ResolvedToken::new(&["a", "b", "c"], "string", "val")]);
//! let json = format_json(&tokens, None).unwrap();
//! let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
//! assert_eq!(parsed["a"]["b"]["c"], "val");
//! ```

pub mod css;
pub mod json;
pub mod typescript;

pub use css::{format_css, CssFormatter};
pub use json::{format_json, JsonFormatter};
pub use typescript::{format_typescript, TypeScriptFormatter};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{FlatTokenMap, ResolvedToken, ThemeConfig, TokenValue};

/// Errors produced while formatting.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// One token's path runs through another token's value
    #[error("token path '{path}' conflicts with another token at '{existing}'")]
    PathConflict { path: String, existing: String },
    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for formatting.
pub type Result<T> = std::result::Result<T, FormatError>;

/// Options for formatting.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Pretty print output (with indentation)
    pub pretty: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Trait for output format implementations.
pub trait Formatter: Send + Sync {
    /// Render `tokens` (and overrides for the themes in `themes`) as text.
    fn format(
        &self,
        tokens: &FlatTokenMap,
        themes: Option<&ThemeConfig>,
        options: &FormatOptions,
    ) -> Result<String>;

    /// Get the format name for this formatter.
    fn format_name(&self) -> &'static str;

    /// Get the default file extension for this format.
    fn extension(&self) -> &'static str;
}

/// Known output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Json,
    #[serde(alias = "ts")]
    Typescript,
    Css,
}

impl FormatKind {
    pub fn formatter(self) -> Box<dyn Formatter> {
        match self {
            FormatKind::Json => Box::new(JsonFormatter),
            FormatKind::Typescript => Box::new(TypeScriptFormatter),
            FormatKind::Css => Box::new(CssFormatter),
        }
    }
}

impl FromStr for FormatKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(FormatKind::Json),
            "typescript" | "ts" => Ok(FormatKind::Typescript),
            "css" => Ok(FormatKind::Css),
            other => Err(format!("unknown format '{}' (expected json, typescript, or css)", other)),
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormatKind::Json => "json",
            FormatKind::Typescript => "typescript",
            FormatKind::Css => "css",
        })
    }
}

// ============================================================================
// Nesting
// ============================================================================

/// Intermediate tree built from raw paths.
#[derive(Debug, Clone, PartialEq)]
enum TokenTree {
    Leaf(Value),
    Group(BTreeMap<String, TokenTree>),
}

impl TokenTree {
    fn into_json(self) -> Value {
        match self {
            TokenTree::Leaf(v) => v,
            TokenTree::Group(children) => {
                Value::Object(children.into_iter().map(|(k, v)| (k, v.into_json())).collect())
            }
        }
    }
}

/// Nest the values picked by `select` into an object keyed by raw path.
///
/// Tokens for which `select` returns `None` are left out.
pub(crate) fn nest<'a, F>(tokens: &'a FlatTokenMap, select: F) -> Result<Map<String, Value>>
where
    F: Fn(&'a ResolvedToken) -> Option<&'a TokenValue>,
{
    let mut root: BTreeMap<String, TokenTree> = BTreeMap::new();

    for token in tokens.values() {
        let Some(value) = select(token) else { continue };
        let conflict = |depth: usize| FormatError::PathConflict {
            path: token.raw_path.join("."),
            existing: token.raw_path[..=depth].join("."),
        };

        let Some((leaf, parents)) = token.raw_path.split_last() else { continue };
        let mut node = &mut root;
        for (depth, segment) in parents.iter().enumerate() {
            let child = node
                .entry(segment.clone())
                .or_insert_with(|| TokenTree::Group(BTreeMap::new()));
            node = match child {
                TokenTree::Group(children) => children,
                TokenTree::Leaf(_) => return Err(conflict(depth)),
            };
        }

        if node.contains_key(leaf) {
            return Err(conflict(parents.len()));
        }
        node.insert(leaf.clone(), TokenTree::Leaf(serde_json::to_value(value)?));
    }

    Ok(root.into_iter().map(|(k, v)| (k, v.into_json())).collect())
}

/// Per-theme override trees, or `None` when no token overrides any of the
/// configured themes.
///
/// Every configured theme gets an entry; a theme's tree holds only the tokens
/// that override it.
pub(crate) fn nest_themes(
    tokens: &FlatTokenMap,
    themes: Option<&ThemeConfig>,
) -> Result<Option<Map<String, Value>>> {
    let Some(themes) = themes else { return Ok(None) };
    if !has_overrides(tokens, themes) {
        return Ok(None);
    }

    let mut out = Map::new();
    for theme in themes.keys() {
        let tree = nest(tokens, |token| token.theme_value(theme).map(|tv| &tv.value))?;
        out.insert(theme.clone(), Value::Object(tree));
    }
    Ok(Some(out))
}

/// True if any token overrides at least one theme in `themes`.
pub(crate) fn has_overrides(tokens: &FlatTokenMap, themes: &ThemeConfig) -> bool {
    tokens.values().any(|token| themes.keys().any(|theme| token.theme_value(theme).is_some()))
}

/// Serialize a JSON value, honoring `pretty`.
pub(crate) fn to_json_string(value: &Value, options: &FormatOptions) -> Result<String> {
    Ok(if options.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
