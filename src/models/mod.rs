//! Data models for design tokens.
//!
//! These types are the shared vocabulary of the pipeline: token loading
//! produces a [`FlatTokenMap`], the transform registry maps it to a new one,
//! and the formatters turn it into text.

mod token;
mod value;

pub use token::{token_map, FlatTokenMap, ResolvedToken, ThemeConfig, ThemeValue, TokenType};
pub use value::{ColorSpace, ColorValue, DimensionValue, TokenValue};
