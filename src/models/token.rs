//! Resolved token model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::value::TokenValue;

/// Kind of a design token. Drives which transforms match it.
///
/// Serializes as its plain string (`"color"`, `"dimension"`, ...). Kinds this
/// crate has no special handling for round-trip through [`TokenType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenType {
    Color,
    Dimension,
    FontFamily,
    FontWeight,
    String,
    Number,
    Duration,
    Other(std::string::String),
}

impl TokenType {
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Color => "color",
            TokenType::Dimension => "dimension",
            TokenType::FontFamily => "fontFamily",
            TokenType::FontWeight => "fontWeight",
            TokenType::String => "string",
            TokenType::Number => "number",
            TokenType::Duration => "duration",
            TokenType::Other(s) => s,
        }
    }
}

impl From<std::string::String> for TokenType {
    fn from(s: std::string::String) -> Self {
        match s.as_str() {
            "color" => TokenType::Color,
            "dimension" => TokenType::Dimension,
            "fontFamily" => TokenType::FontFamily,
            "fontWeight" => TokenType::FontWeight,
            "string" => TokenType::String,
            "number" => TokenType::Number,
            "duration" => TokenType::Duration,
            _ => TokenType::Other(s),
        }
    }
}

impl From<&str> for TokenType {
    fn from(s: &str) -> Self {
        TokenType::from(s.to_string())
    }
}

impl From<TokenType> for std::string::String {
    fn from(t: TokenType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A per-theme override of a token's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeValue {
    pub value: TokenValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
}

impl ThemeValue {
    pub fn new(value: impl Into<TokenValue>) -> Self {
        Self { value: value.into(), alias_of: None }
    }

    pub fn with_alias(mut self, alias_of: impl Into<String>) -> Self {
        self.alias_of = Some(alias_of.into());
        self
    }
}

/// One design token after alias and theme resolution.
///
/// `alias_of` is provenance only: nothing in the pipeline reads it, and it is
/// carried unchanged through every transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedToken {
    /// Display form of the path, e.g. `colors.primary`
    pub path: String,
    /// Path segments; defines nesting in generated output
    pub raw_path: Vec<String>,
    pub value: TokenValue,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_values: Option<BTreeMap<String, ThemeValue>>,
}

impl ResolvedToken {
    /// Create a token from its path segments. `path` is the segments joined with `.`.
    pub fn new<S: AsRef<str>>(
        raw_path: &[S],
        token_type: impl Into<TokenType>,
        value: impl Into<TokenValue>,
    ) -> Self {
        let raw_path: Vec<String> = raw_path.iter().map(|s| s.as_ref().to_string()).collect();
        Self {
            path: raw_path.join("."),
            raw_path,
            value: value.into(),
            token_type: token_type.into(),
            alias_of: None,
            theme_values: None,
        }
    }

    pub fn with_alias(mut self, alias_of: impl Into<String>) -> Self {
        self.alias_of = Some(alias_of.into());
        self
    }

    /// Add (or replace) an override for `theme`.
    pub fn with_theme(mut self, theme: impl Into<String>, value: ThemeValue) -> Self {
        self.theme_values.get_or_insert_with(BTreeMap::new).insert(theme.into(), value);
        self
    }

    /// Key this token is stored under in a [`FlatTokenMap`].
    pub fn key(&self) -> String {
        self.raw_path.join(".")
    }

    /// Override for `theme`, if any.
    pub fn theme_value(&self, theme: &str) -> Option<&ThemeValue> {
        self.theme_values.as_ref().and_then(|m| m.get(theme))
    }

    /// True if at least one theme override is present.
    pub fn has_theme_values(&self) -> bool {
        self.theme_values.as_ref().is_some_and(|m| !m.is_empty())
    }
}

/// Dotted raw path to token. Ordered so every generated output is stable.
pub type FlatTokenMap = BTreeMap<String, ResolvedToken>;

/// Theme name to selector (e.g. `[data-theme="dark"]`).
pub type ThemeConfig = BTreeMap<String, String>;

/// Build a [`FlatTokenMap`] from tokens, keyed by their raw path.
pub fn token_map(tokens: impl IntoIterator<Item = ResolvedToken>) -> FlatTokenMap {
    tokens.into_iter().map(|t| (t.key(), t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_type_round_trip() {
        for name in ["color", "dimension", "fontFamily", "fontWeight", "string", "shadow"] {
            let t: TokenType = serde_json::from_str(&format!("\"{}\"", name)).unwrap();
            assert_eq!(serde_json::to_string(&t).unwrap(), format!("\"{}\"", name));
        }
        assert_eq!(TokenType::from("shadow"), TokenType::Other("shadow".to_string()));
    }

    #[test]
    fn test_deserialize_camel_case_fields() {
        let json = r##"{
            "path": "colors.primary",
            "rawPath": ["colors", "primary"],
            "value": "#ff0000",
            "type": "color",
            "aliasOf": "palette.red",
            "themeValues": { "dark": { "value": "#880000", "aliasOf": "palette.darkRed" } }
        }"##;
        let token: ResolvedToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.token_type, TokenType::Color);
        assert_eq!(token.alias_of.as_deref(), Some("palette.red"));
        let dark = token.theme_value("dark").unwrap();
        assert_eq!(dark.alias_of.as_deref(), Some("palette.darkRed"));
        assert!(token.has_theme_values());
    }

    #[test]
    fn test_new_joins_path() {
        let token = ResolvedToken::new(&["spacing", "sm"], "dimension", 4);
        assert_eq!(token.path, "spacing.sm");
        assert_eq!(token.key(), "spacing.sm");
        assert!(!token.has_theme_values());
    }

    #[test]
    fn test_empty_theme_values_not_counted() {
        let mut token = ResolvedToken::new(&["a"], "color", "red");
        token.theme_values = Some(BTreeMap::new());
        assert!(!token.has_theme_values());
    }

    #[test]
    fn test_token_map_keys() {
        let map = token_map([
            ResolvedToken::new(&["a", "b"], "string", "x"),
            ResolvedToken::new(&["c"], "string", "y"),
        ]);
        assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec!["a.b", "c"]);
    }
}
