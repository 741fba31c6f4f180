//! Shift - design token transform pipeline
//!
//! This library provides functionality to:
//! - Load flat maps of already-resolved design tokens
//! - Run named pipelines of value transforms over them (colors, dimensions)
//! - Format the result as JSON, TypeScript or CSS, with per-theme overrides
//! - Build every target of a `shift.toml` project in parallel

pub mod build;
pub mod cli;
pub mod color;
pub mod config;
pub mod format;
pub mod models;
pub mod registry;
pub mod tokens;
pub mod transforms;

pub use format::{FormatKind, FormatOptions, Formatter};
pub use models::{FlatTokenMap, ResolvedToken, ThemeConfig, ThemeValue, TokenType, TokenValue};
pub use registry::TransformRegistry;
pub use transforms::{TransformError, ValueTransform, ValueTransformDef};
