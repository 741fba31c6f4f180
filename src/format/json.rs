//! JSON output format.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "$themes": {
//!     "dark": {
//!       "colors": { "bg": "#000000" }
//!     }
//!   },
//!   "colors": {
//!     "bg": "#ffffff",
//!     "fg": "#111111"
//!   },
//!   "spacing": { "md": "16px" }
//! }
//! ```
//!
//! `$themes` is only present when a theme config is given and at least one
//! token overrides one of its themes.

use serde_json::Value;

use crate::models::{FlatTokenMap, ThemeConfig};

use super::{nest, nest_themes, to_json_string, FormatError, FormatOptions, Formatter, Result};

/// Key holding per-theme override trees.
pub const THEMES_KEY: &str = "$themes";

/// JSON formatter.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(
        &self,
        tokens: &FlatTokenMap,
        themes: Option<&ThemeConfig>,
        options: &FormatOptions,
    ) -> Result<String> {
        let mut root = nest(tokens, |token| Some(&token.value))?;
        if let Some(theme_trees) = nest_themes(tokens, themes)? {
            if root.contains_key(THEMES_KEY) {
                let path = tokens
                    .values()
                    .find(|t| t.raw_path.first().map(String::as_str) == Some(THEMES_KEY))
                    .map_or_else(|| THEMES_KEY.to_string(), |t| t.raw_path.join("."));
                return Err(FormatError::PathConflict { path, existing: THEMES_KEY.to_string() });
            }
            root.insert(THEMES_KEY.to_string(), Value::Object(theme_trees));
        }
        to_json_string(&Value::Object(root), options)
    }

    fn format_name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// Format `tokens` as pretty-printed JSON.
pub fn format_json(tokens: &FlatTokenMap, themes: Option<&ThemeConfig>) -> Result<String> {
    JsonFormatter.format(tokens, themes, &FormatOptions::default())
}
