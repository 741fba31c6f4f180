//! Registry of named value transforms and pipelines.
//!
//! [`TransformRegistry`] maps names to [`ValueTransform`](crate::transforms::ValueTransform)
//! implementations and to pipelines (ordered lists of transform names), and
//! applies a pipeline across a whole [`FlatTokenMap`](crate::models::FlatTokenMap).

mod transform;

pub use transform::TransformRegistry;
