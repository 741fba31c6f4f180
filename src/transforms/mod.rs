//! Value transforms for design tokens
//!
//! A transform is a pure function from (value, token) to a new value,
//! guarded by a predicate on the token. Transforms are registered by name in a
//! [`TransformRegistry`](crate::registry::TransformRegistry) and composed into
//! named pipelines.
//!
//! # Module Structure
//!
//! - [`types`] - `ValueTransform` trait and error definitions
//! - [`color`] - `color/*` transforms
//! - [`dimension`] - `dimension/px`
//! - [`presets`] - built-in registration and preset pipelines

pub mod color;
pub mod dimension;
pub mod presets;
pub mod types;

// Re-export main types at the module level for convenience
pub use color::{ColorFormat, ColorTransform};
pub use dimension::{DimensionPx, DIMENSION_PX};
pub use presets::{register_builtins, PRESETS};
pub use types::{DimensionTransformError, Result, TransformError, ValueTransform, ValueTransformDef};
