//! Token value types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete, resolved token value.
///
/// Deserializes from plain JSON: numbers stay numbers (integers are kept as
/// integers so generated output never gains a stray `.0`), strings stay
/// strings, and the two structured forms are recognised by their fields.
///
/// # Examples
///
/// ```
/// use shift::models::TokenValue;
///
/// let n: TokenValue = serde_json::from_str("16").unwrap();
/// let d: TokenValue = serde_json::from_str(r#"{"value": 1.5, "unit": "rem"}"#).unwrap();
///
/// assert!(n.is_number());
/// assert_eq!(d.to_string(), "1.5rem");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    /// A bare number
    Number(serde_json::Number),
    /// Any string (hex color, `16px`, font name, ...)
    String(String),
    /// A structured `{ value, unit }` dimension
    Dimension(DimensionValue),
    /// A structured color object
    Color(ColorValue),
}

impl TokenValue {
    /// Returns true if this is a bare number
    pub fn is_number(&self) -> bool {
        matches!(self, TokenValue::Number(_))
    }

    /// Returns the string if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number as f64 if this is a bare number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Number(n) => write!(f, "{}", n),
            TokenValue::String(s) => f.write_str(s),
            TokenValue::Dimension(d) => write!(f, "{}", d),
            TokenValue::Color(c) => write!(f, "{}", c),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        TokenValue::String(s.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        TokenValue::String(s)
    }
}

impl From<i64> for TokenValue {
    fn from(n: i64) -> Self {
        TokenValue::Number(n.into())
    }
}

impl From<i32> for TokenValue {
    fn from(n: i32) -> Self {
        TokenValue::Number(n.into())
    }
}

impl From<DimensionValue> for TokenValue {
    fn from(d: DimensionValue) -> Self {
        TokenValue::Dimension(d)
    }
}

impl From<ColorValue> for TokenValue {
    fn from(c: ColorValue) -> Self {
        TokenValue::Color(c)
    }
}

/// A number paired with a CSS unit, e.g. `{ "value": 16, "unit": "px" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionValue {
    pub value: f64,
    pub unit: String,
}

impl DimensionValue {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self { value, unit: unit.into() }
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64 Display already drops a trailing `.0`
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Color space of a structured [`ColorValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    /// Components are red, green, blue in `0..=1`
    Srgb,
    /// Components are lightness (`0..=1`), chroma, hue in degrees
    Oklch,
}

/// A structured color object.
///
/// ```json
/// { "colorSpace": "srgb", "components": [1, 0.5, 0], "alpha": 0.8 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorValue {
    pub color_space: ColorSpace,
    pub components: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::color::color_value_to_css(self))
    }
}
