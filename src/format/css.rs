//! CSS custom-property output format.
//!
//! ```css
//! :root {
//!   --colors-bg: #ffffff;
//!   --spacing-md: 16px;
//! }
//!
//! [data-theme="dark"] {
//!   --colors-bg: #000000;
//! }
//! ```
//!
//! Values are written as-is; alias provenance never becomes `var()`.
//! A theme block is written only for themes that have at least one override,
//! using the selector from the theme config.

use std::fmt::Write as _;

use crate::models::{FlatTokenMap, ThemeConfig, TokenValue};

use super::{FormatOptions, Formatter, Result};

/// CSS custom-property formatter.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssFormatter;

impl Formatter for CssFormatter {
    fn format(
        &self,
        tokens: &FlatTokenMap,
        themes: Option<&ThemeConfig>,
        options: &FormatOptions,
    ) -> Result<String> {
        let base: Vec<_> = tokens.values().map(|t| (t.raw_path.as_slice(), &t.value)).collect();
        let mut out = block(":root", &base, options);

        for (theme, selector) in themes.into_iter().flatten() {
            let overrides: Vec<_> = tokens
                .values()
                .filter_map(|t| t.theme_value(theme).map(|tv| (t.raw_path.as_slice(), &tv.value)))
                .collect();
            if overrides.is_empty() {
                continue;
            }
            if options.pretty {
                out.push('\n');
            }
            out.push_str(&block(selector, &overrides, options));
        }
        Ok(out)
    }

    fn format_name(&self) -> &'static str {
        "css"
    }

    fn extension(&self) -> &'static str {
        "css"
    }
}

fn block(selector: &str, entries: &[(&[String], &TokenValue)], options: &FormatOptions) -> String {
    let mut out = String::new();
    if entries.is_empty() {
        let _ = writeln!(out, "{} {{}}", selector);
        return out;
    }

    if options.pretty {
        let _ = writeln!(out, "{} {{", selector);
        for (path, value) in entries {
            let _ = writeln!(out, "  {}: {};", property_name(path), value);
        }
        out.push_str("}\n");
    } else {
        let _ = write!(out, "{}{{", selector);
        for (path, value) in entries {
            let _ = write!(out, "{}:{};", property_name(path), value);
        }
        out.push_str("}\n");
    }
    out
}

/// `["colors", "brand primary"]` -> `--colors-brand-primary`
pub fn property_name(raw_path: &[String]) -> String {
    let joined = raw_path.join("-");
    let sanitized: String = joined
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    format!("--{}", sanitized)
}

/// Format `tokens` as CSS custom properties.
pub fn format_css(tokens: &FlatTokenMap, themes: Option<&ThemeConfig>) -> Result<String> {
    CssFormatter.format(tokens, themes, &FormatOptions::default())
}
