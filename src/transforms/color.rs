//! Built-in color transforms
//!
//! Every color transform matches `type == "color"` only. `color/css`
//! validates and normalizes; the others re-render the parsed color in a
//! target notation.

use crate::color::{self, Rgba};
use crate::models::{ResolvedToken, TokenType, TokenValue};

use super::types::{Result, TransformError, ValueTransform};

/// Target notation of a color transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    /// Valid strings pass through, color objects become CSS text
    Css,
    /// `rgb(r, g, b)` / `rgba(r, g, b, a)`
    Rgb,
    /// `#rrggbb`, or `#rrggbbaa` when translucent
    Hex,
    /// `#rrggbbaa`
    Hex8Rgba,
    /// `#aarrggbb`
    Hex8Argb,
    /// `oklch(L% C H)`
    Oklch,
}

impl ColorFormat {
    /// Registry name of the transform producing this format.
    pub fn transform_name(self) -> &'static str {
        match self {
            ColorFormat::Css => "color/css",
            ColorFormat::Rgb => "color/rgb",
            ColorFormat::Hex => "color/hex",
            ColorFormat::Hex8Rgba => "color/hex8rgba",
            ColorFormat::Hex8Argb => "color/hex8argb",
            ColorFormat::Oklch => "color/oklch",
        }
    }

    fn render(self, c: Rgba) -> String {
        match self {
            ColorFormat::Css | ColorFormat::Hex => color::to_hex(c),
            ColorFormat::Rgb => color::to_rgb_css(c),
            ColorFormat::Hex8Rgba => color::to_hex8_rgba(c),
            ColorFormat::Hex8Argb => color::to_hex8_argb(c),
            ColorFormat::Oklch => color::to_oklch_css(c),
        }
    }
}

/// Every built-in color format, in registration order.
pub const COLOR_FORMATS: [ColorFormat; 6] = [
    ColorFormat::Css,
    ColorFormat::Rgb,
    ColorFormat::Hex,
    ColorFormat::Hex8Rgba,
    ColorFormat::Hex8Argb,
    ColorFormat::Oklch,
];

/// A color transform rendering to one [`ColorFormat`].
#[derive(Debug, Clone, Copy)]
pub struct ColorTransform {
    format: ColorFormat,
}

impl ColorTransform {
    pub fn new(format: ColorFormat) -> Self {
        Self { format }
    }

    pub fn name(&self) -> &'static str {
        self.format.transform_name()
    }
}

impl ValueTransform for ColorTransform {
    fn matches(&self, token: &ResolvedToken) -> bool {
        token.token_type == TokenType::Color
    }

    fn transform(&self, value: &TokenValue, token: &ResolvedToken) -> Result<TokenValue> {
        let parsed =
            color::value_to_rgba(value).map_err(|e| TransformError::failed(self.name(), token, e))?;

        if self.format == ColorFormat::Css {
            return Ok(match value {
                TokenValue::String(s) => TokenValue::String(s.trim().to_string()),
                TokenValue::Color(c) => TokenValue::String(color::color_value_to_css(c)),
                _ => TokenValue::String(color::to_hex(parsed)),
            });
        }

        Ok(TokenValue::String(self.format.render(parsed)))
    }
}
