//! Color parsing and rendering for color tokens
//!
//! Parses the following formats:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - Functional: `rgb()`, `rgba()`, `hsl()`, `hsla()`, `hwb()`, `oklch()`
//! - Named: `red`, `blue`, `transparent`, etc.
//! - Structured [`ColorValue`] objects (`srgb` or `oklch` components)
//!
//! and renders to hex (6 or 8 digit, RGBA or ARGB byte order), `rgb()` and
//! `oklch()` text.

use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

use crate::models::{ColorSpace, ColorValue, TokenValue};

/// An 8-bit sRGB color with alpha, channels in `[r, g, b, a]` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub fn is_opaque(&self) -> bool {
        self.0[3] == 255
    }
}

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
    /// Token value is not a string or color object
    #[error("expected a color string or color object, got {0}")]
    NotAColor(String),
}

impl<T: std::fmt::Display> From<lightningcss::error::Error<T>> for ColorError {
    fn from(e: lightningcss::error::Error<T>) -> Self {
        ColorError::CssParse(e.to_string())
    }
}

/// Parse a CSS color string into an RGBA color.
///
/// # Examples
///
/// ```
/// use shift::color::{parse_color, Rgba};
///
/// assert_eq!(parse_color("#F00").unwrap(), Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("rgb(0, 255, 0)").unwrap(), Rgba([0, 255, 0, 255]));
/// assert_eq!(parse_color("blue").unwrap(), Rgba([0, 0, 255, 255]));
/// assert_eq!(parse_color("hsl(0, 100%, 50%)").unwrap(), Rgba([255, 0, 0, 255]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is empty or unparseable.
pub fn parse_color(s: &str) -> Result<Rgba, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    // Fast path for hex colors
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    parse_css_color(s)
}

/// Resolve any color-shaped token value to RGBA.
pub fn value_to_rgba(value: &TokenValue) -> Result<Rgba, ColorError> {
    match value {
        TokenValue::String(s) => parse_color(s),
        TokenValue::Color(c) => Ok(color_value_to_rgba(c)),
        other => Err(ColorError::NotAColor(other.to_string())),
    }
}

/// Parse the digits of a hex color (without the leading `#`)
fn parse_hex_color(hex: &str) -> Result<Rgba, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    // Safe to index bytes: all characters are ASCII hex digits
    let digits: Vec<u8> = hex.bytes().map(hex_value).collect();
    match digits.len() {
        3 => Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, 255])),
        4 => Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, digits[3] * 17])),
        6 => Ok(Rgba([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            255,
        ])),
        8 => Ok(Rgba([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            digits[6] * 16 + digits[7],
        ])),
        len => Err(ColorError::InvalidLength(len)),
    }
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgba, ColorError> {
    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    css_color_to_rgba(css_color)
}

/// Convert a lightningcss CssColor to RGBA
fn css_color_to_rgba(color: CssColor) -> Result<Rgba, ColorError> {
    use lightningcss::values::color::FloatColor;

    let rgb_color = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            // Components with `none` values come back as floats
            FloatColor::RGB(rgb) => Ok(Rgba([
                unit_to_byte(rgb.r as f64),
                unit_to_byte(rgb.g as f64),
                unit_to_byte(rgb.b as f64),
                unit_to_byte(rgb.alpha as f64),
            ])),
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

fn unit_to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ============================================================================
// Rendering
// ============================================================================

/// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
pub fn to_hex(c: Rgba) -> String {
    if c.is_opaque() {
        format!("#{:02x}{:02x}{:02x}", c.0[0], c.0[1], c.0[2])
    } else {
        to_hex8_rgba(c)
    }
}

/// Always 8 digits, alpha last (CSS convention).
pub fn to_hex8_rgba(c: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}{:02x}", c.0[0], c.0[1], c.0[2], c.0[3])
}

/// Always 8 digits, alpha first (Android / Windows convention).
pub fn to_hex8_argb(c: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}{:02x}", c.0[3], c.0[0], c.0[1], c.0[2])
}

/// `rgb(r, g, b)` for opaque colors, `rgba(r, g, b, a)` otherwise.
pub fn to_rgb_css(c: Rgba) -> String {
    let [r, g, b, a] = c.0;
    if c.is_opaque() {
        format!("rgb({}, {}, {})", r, g, b)
    } else {
        format!("rgba({}, {}, {}, {})", r, g, b, decimal(a as f64 / 255.0, 3))
    }
}

/// `oklch(L% C H)`, with ` / alpha` appended for translucent colors.
pub fn to_oklch_css(c: Rgba) -> String {
    let [r, g, b, a] = c.0;
    let (l, chroma, hue) =
        srgb_to_oklch(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    format_oklch(l, chroma, hue, (a != 255).then(|| a as f64 / 255.0))
}

/// Render a structured color object as CSS text.
pub fn color_value_to_css(c: &ColorValue) -> String {
    match c.color_space {
        ColorSpace::Srgb => to_hex(color_value_to_rgba(c)),
        ColorSpace::Oklch => {
            let [l, chroma, hue] = c.components;
            format_oklch(l, chroma, hue, c.alpha.filter(|a| *a < 1.0))
        }
    }
}

/// Convert a structured color object to 8-bit RGBA (out-of-gamut channels clamp).
pub fn color_value_to_rgba(c: &ColorValue) -> Rgba {
    let alpha = unit_to_byte(c.alpha.unwrap_or(1.0));
    let [x, y, z] = c.components;
    let (r, g, b) = match c.color_space {
        ColorSpace::Srgb => (x, y, z),
        ColorSpace::Oklch => oklch_to_srgb(x, y, z),
    };
    Rgba([unit_to_byte(r), unit_to_byte(g), unit_to_byte(b), alpha])
}

fn format_oklch(l: f64, chroma: f64, hue: f64, alpha: Option<f64>) -> String {
    // Hue is meaningless for achromatic colors
    let hue = if chroma < 1e-4 { 0.0 } else { hue };
    let body = format!("{}% {} {}", decimal(l * 100.0, 2), decimal(chroma, 4), decimal(hue, 2));
    match alpha {
        Some(a) => format!("oklch({} / {})", body, decimal(a, 3)),
        None => format!("oklch({})", body),
    }
}

/// Fixed-precision decimal with trailing zeros stripped.
fn decimal(v: f64, places: usize) -> String {
    let s = format!("{:.*}", places, v);
    let s = if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { &s };
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

// ============================================================================
// OKLab / OKLCH (D65), direct linear sRGB <-> OKLab matrices
// ============================================================================

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Gamma sRGB (0..1) to OKLCH (L 0..1, chroma, hue in degrees 0..360).
fn srgb_to_oklch(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let (r, g, b) = (srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));

    let l = (0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b).cbrt();
    let m = (0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b).cbrt();
    let s = (0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b).cbrt();

    let lightness = 0.2104542553 * l + 0.7936177850 * m - 0.0040720468 * s;
    let ok_a = 1.9779984951 * l - 2.4285922050 * m + 0.4505937099 * s;
    let ok_b = 0.0259040371 * l + 0.7827717662 * m - 0.8086757660 * s;

    let chroma = (ok_a * ok_a + ok_b * ok_b).sqrt();
    let mut hue = ok_b.atan2(ok_a).to_degrees();
    if hue < 0.0 {
        hue += 360.0;
    }
    (lightness, chroma, hue)
}

/// OKLCH (hue in degrees) to gamma sRGB, unclamped.
fn oklch_to_srgb(lightness: f64, chroma: f64, hue: f64) -> (f64, f64, f64) {
    let h = hue.to_radians();
    let (ok_a, ok_b) = (chroma * h.cos(), chroma * h.sin());

    let l = (lightness + 0.3963377774 * ok_a + 0.2158037573 * ok_b).powi(3);
    let m = (lightness - 0.1055613458 * ok_a - 0.0638541728 * ok_b).powi(3);
    let s = (lightness - 0.0894841775 * ok_a - 1.2914855480 * ok_b).powi(3);

    let r = 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s;
    let g = -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s;
    let b = -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s;

    (linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
}
