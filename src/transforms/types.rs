//! Core value-transform types and error definitions
//!
//! Contains the `ValueTransform` trait implemented by every registered
//! transform, `ValueTransformDef` for closure-based transforms, and the
//! `TransformError` / `DimensionTransformError` error types.

use std::fmt;

use crate::models::{ResolvedToken, TokenValue};

/// Errors that can occur while applying a pipeline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum TransformError {
    /// The requested pipeline was never defined
    #[error("unknown pipeline: {pipeline}")]
    UnknownPipeline { pipeline: String },

    /// A defined pipeline names a transform that was never registered
    #[error("pipeline '{pipeline}' references unknown transform: {transform}")]
    UnknownTransform { pipeline: String, transform: String },

    /// A transform rejected a token value
    #[error("transform '{transform}' failed on token '{path}': {cause}")]
    Failed { transform: String, path: String, cause: String },

    /// The dimension transform rejected a token value
    #[error(transparent)]
    Dimension(#[from] DimensionTransformError),

    /// A transform rejected one of a token's theme override values
    #[error("{source} (theme '{theme}')")]
    Theme {
        theme: String,
        #[source]
        source: Box<TransformError>,
    },
}

impl TransformError {
    /// Build a `Failed` error for `token`.
    pub fn failed(
        transform: impl Into<String>,
        token: &ResolvedToken,
        cause: impl fmt::Display,
    ) -> Self {
        TransformError::Failed {
            transform: transform.into(),
            path: token.path.clone(),
            cause: cause.to_string(),
        }
    }

    /// Name of the transform (or pipeline, for unknown pipelines) involved.
    pub fn name(&self) -> &str {
        match self {
            TransformError::UnknownPipeline { pipeline } => pipeline,
            TransformError::UnknownTransform { transform, .. } => transform,
            TransformError::Failed { transform, .. } => transform,
            TransformError::Dimension(e) => &e.transform,
            TransformError::Theme { source, .. } => source.name(),
        }
    }

    /// Attribute this error to a theme override of the token.
    pub fn in_theme(self, theme: impl Into<String>) -> Self {
        TransformError::Theme { theme: theme.into(), source: Box::new(self) }
    }

    /// Theme whose override value failed, if any.
    pub fn theme(&self) -> Option<&str> {
        match self {
            TransformError::Theme { theme, .. } => Some(theme),
            _ => None,
        }
    }

    /// Path of the offending token, when a token was involved.
    pub fn path(&self) -> Option<&str> {
        match self {
            TransformError::Failed { path, .. } => Some(path),
            TransformError::Dimension(e) => Some(&e.path),
            TransformError::Theme { source, .. } => source.path(),
            _ => None,
        }
    }
}

/// A dimension string that is neither a bare number nor a number with a
/// supported unit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transform '{transform}' failed on token '{path}': invalid dimension value '{value}'")]
pub struct DimensionTransformError {
    pub transform: String,
    pub path: String,
    pub value: String,
}

/// Result type alias for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// A single-value transform guarded by a token predicate.
///
/// `transform` only runs for tokens where `matches` returns true. The same
/// pair is used for a token's base value and for each of its theme overrides,
/// so implementations must read the value from the `value` argument rather
/// than from `token.value`.
pub trait ValueTransform: Send + Sync {
    /// Whether this transform applies to `token`.
    fn matches(&self, token: &ResolvedToken) -> bool;

    /// Produce the new value for `token`.
    fn transform(&self, value: &TokenValue, token: &ResolvedToken) -> Result<TokenValue>;
}

type MatchFn = dyn Fn(&ResolvedToken) -> bool + Send + Sync;
type TransformFn = dyn Fn(&TokenValue, &ResolvedToken) -> Result<TokenValue> + Send + Sync;

/// A [`ValueTransform`] built from two closures.
///
/// # Example
///
/// ```
/// use shift::models::{TokenType, TokenValue};
/// use shift::transforms::ValueTransformDef;
///
/// let upper = ValueTransformDef::new(
///     |token| token.token_type == TokenType::FontFamily,
///     |value, _| Ok(TokenValue::String(value.to_string().to_uppercase())),
/// );
/// # let _ = upper;
/// ```
pub struct ValueTransformDef {
    matcher: Box<MatchFn>,
    transformer: Box<TransformFn>,
}

impl ValueTransformDef {
    pub fn new<M, T>(matcher: M, transformer: T) -> Self
    where
        M: Fn(&ResolvedToken) -> bool + Send + Sync + 'static,
        T: Fn(&TokenValue, &ResolvedToken) -> Result<TokenValue> + Send + Sync + 'static,
    {
        Self { matcher: Box::new(matcher), transformer: Box::new(transformer) }
    }
}

impl ValueTransform for ValueTransformDef {
    fn matches(&self, token: &ResolvedToken) -> bool {
        (self.matcher)(token)
    }

    fn transform(&self, value: &TokenValue, token: &ResolvedToken) -> Result<TokenValue> {
        (self.transformer)(value, token)
    }
}

impl fmt::Debug for ValueTransformDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueTransformDef").finish_non_exhaustive()
    }
}
