//! Built-in dimension transform (`dimension/px`)
//!
//! Accepted inputs:
//! - `{ "value": 1.5, "unit": "rem" }` -> `"1.5rem"`
//! - `24` -> `"24px"`
//! - `"16"` -> `"16px"`
//! - `"2rem"`, `"50%"`, `"100vh"` ... -> unchanged
//!
//! Anything else is a [`DimensionTransformError`].

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ResolvedToken, TokenType, TokenValue};

use super::types::{DimensionTransformError, Result, ValueTransform};

pub const DIMENSION_PX: &str = "dimension/px";

static BARE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)$").expect("valid regex"));

static WITH_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)(px|rem|em|%|vh|vw|vmin|vmax|ch|ex)$").expect("valid regex")
});

/// Normalizes dimension tokens to unit-suffixed strings, defaulting to `px`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionPx;

impl ValueTransform for DimensionPx {
    fn matches(&self, token: &ResolvedToken) -> bool {
        token.token_type == TokenType::Dimension
    }

    fn transform(&self, value: &TokenValue, token: &ResolvedToken) -> Result<TokenValue> {
        let invalid = || DimensionTransformError {
            transform: DIMENSION_PX.to_string(),
            path: token.path.clone(),
            value: value.to_string(),
        };

        let rendered = match value {
            TokenValue::Dimension(d) => d.to_string(),
            TokenValue::Number(n) => format!("{}px", plain_number(n)),
            TokenValue::String(s) => {
                let s = s.trim();
                if BARE_NUMBER_RE.is_match(s) {
                    format!("{}px", s)
                } else if WITH_UNIT_RE.is_match(s) {
                    s.to_string()
                } else {
                    return Err(invalid().into());
                }
            }
            TokenValue::Color(_) => return Err(invalid().into()),
        };

        Ok(TokenValue::String(rendered))
    }
}

/// Render a JSON number without exponent notation so the result stays a
/// valid bare dimension on the next pass.
fn plain_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DimensionValue;
    use crate::transforms::TransformError;

    fn px(value: impl Into<TokenValue>) -> Result<TokenValue> {
        let token = ResolvedToken::new(&["spacing", "md"], "dimension", value);
        DimensionPx.transform(&token.value, &token)
    }

    fn px_str(value: impl Into<TokenValue>) -> String {
        px(value).unwrap().to_string()
    }

    #[test]
    fn test_numbers_get_px() {
        assert_eq!(px_str(24), "24px");
        assert_eq!(px_str("16"), "16px");
        assert_eq!(px_str("-4"), "-4px");
        assert_eq!(px_str("0.5"), "0.5px");
        assert_eq!(px_str(".5"), ".5px");
        let decimal: TokenValue = serde_json::from_str("1.25").unwrap();
        assert_eq!(px_str(decimal), "1.25px");
    }

    #[test]
    fn test_exponent_numbers_render_plain() {
        for (text, expected) in
            [("1e-7", "0.0000001px"), ("1e21", "1000000000000000000000px"), ("16.0", "16px")]
        {
            let number: TokenValue = serde_json::from_str(text).unwrap();
            let once = px(number).unwrap();
            assert_eq!(once, TokenValue::from(expected), "{}", text);
            assert_eq!(px(once.clone()).unwrap(), once, "{} should re-apply cleanly", text);
        }
    }

    #[test]
    fn test_suffixed_strings_pass_through() {
        for s in ["16px", "1.5rem", "2em", "50%", "100vh", "100vw", "10vmin", "10vmax", "60ch", "2ex"] {
            assert_eq!(px_str(s), s);
        }
        assert_eq!(px_str("-0.5rem"), "-0.5rem");
    }

    #[test]
    fn test_structured_dimension() {
        assert_eq!(px_str(DimensionValue::new(1.5, "rem")), "1.5rem");
        assert_eq!(px_str(DimensionValue::new(8.0, "px")), "8px");
    }

    #[test]
    fn test_idempotent() {
        let once = px("16px").unwrap();
        let twice = px(once.clone()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice, TokenValue::from("16px"));
    }

    #[test]
    fn test_invalid_strings_fail() {
        for s in ["not-a-dimension", "", "16 px", "12pt", "px", "1.2.3px"] {
            match px(s) {
                Err(TransformError::Dimension(e)) => {
                    assert_eq!(e.path, "spacing.md");
                    assert_eq!(e.value, s);
                    assert_eq!(e.transform, DIMENSION_PX);
                }
                other => panic!("expected dimension error for {:?}, got {:?}", s, other),
            }
        }
    }

    #[test]
    fn test_only_matches_dimension_tokens() {
        assert!(DimensionPx.matches(&ResolvedToken::new(&["a"], "dimension", 1)));
        assert!(!DimensionPx.matches(&ResolvedToken::new(&["a"], "fontWeight", 400)));
    }
}
