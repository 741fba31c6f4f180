//! TypeScript module output format.
//!
//! Emits `const`-typed object literals:
//!
//! ```ts
//! export const tokens = {
//!   "colors": {
//!     "bg": "#ffffff"
//!   }
//! } as const
//!
//! export const themes = {
//!   "dark": {
//!     "colors": {
//!       "bg": "#000000"
//!     }
//!   }
//! } as const
//! ```
//!
//! JSON object syntax is valid TypeScript object-literal syntax (quoted
//! keys, quoted strings, bare numbers), so the literals are rendered with
//! `serde_json`.

use serde_json::Value;

use crate::models::{FlatTokenMap, ThemeConfig};

use super::{nest, nest_themes, to_json_string, FormatOptions, Formatter, Result};

/// TypeScript formatter.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptFormatter;

impl Formatter for TypeScriptFormatter {
    fn format(
        &self,
        tokens: &FlatTokenMap,
        themes: Option<&ThemeConfig>,
        options: &FormatOptions,
    ) -> Result<String> {
        let base = Value::Object(nest(tokens, |token| Some(&token.value))?);
        let mut out = export_const("tokens", &base, options)?;

        if let Some(theme_trees) = nest_themes(tokens, themes)? {
            out.push('\n');
            out.push_str(&export_const("themes", &Value::Object(theme_trees), options)?);
        }
        Ok(out)
    }

    fn format_name(&self) -> &'static str {
        "typescript"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }
}

fn export_const(name: &str, value: &Value, options: &FormatOptions) -> Result<String> {
    Ok(format!("export const {} = {} as const\n", name, to_json_string(value, options)?))
}

/// Format `tokens` as a TypeScript module.
pub fn format_typescript(tokens: &FlatTokenMap, themes: Option<&ThemeConfig>) -> Result<String> {
    TypeScriptFormatter.format(tokens, themes, &FormatOptions::default())
}
