//! Transform registry: named value transforms and named pipelines.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::models::{FlatTokenMap, ResolvedToken, TokenValue};
use crate::transforms::{self, TransformError, ValueTransform};

/// Registry for value transforms and the pipelines composed from them.
///
/// Registering or defining an existing name replaces the previous entry.
/// Pipelines are resolved lazily: a pipeline may be defined before the
/// transforms it names are registered, and an unknown step only fails when
/// the pipeline is applied.
#[derive(Clone, Default)]
pub struct TransformRegistry {
    transforms: HashMap<String, Arc<dyn ValueTransform>>,
    pipelines: BTreeMap<String, Vec<String>>,
}

impl TransformRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in transform and preset pipeline.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        transforms::register_builtins(&mut registry);
        registry
    }

    /// Register a transform under `name`.
    pub fn register(&mut self, name: impl Into<String>, transform: impl ValueTransform + 'static) {
        let name = name.into();
        if self.transforms.insert(name.clone(), Arc::new(transform)).is_some() {
            debug!(transform = %name, "replaced registered transform");
        }
    }

    /// Define `name` as an ordered list of transform names. An empty list is
    /// the identity pipeline.
    pub fn define<I, S>(&mut self, name: impl Into<String>, steps: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let steps: Vec<String> = steps.into_iter().map(Into::into).collect();
        if self.pipelines.insert(name.clone(), steps).is_some() {
            debug!(pipeline = %name, "replaced pipeline definition");
        }
    }

    /// Names of every defined pipeline, sorted.
    pub fn pipelines(&self) -> Vec<&str> {
        self.pipelines.keys().map(String::as_str).collect()
    }

    /// Steps of a pipeline.
    pub fn pipeline(&self, name: &str) -> Option<&[String]> {
        self.pipelines.get(name).map(Vec::as_slice)
    }

    /// Check if a pipeline with the given name is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.pipelines.contains_key(name)
    }

    /// Check if a transform with the given name is registered.
    pub fn has_transform(&self, name: &str) -> bool {
        self.transforms.contains_key(name)
    }

    /// Names of every registered transform, sorted.
    pub fn transform_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.transforms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run `pipeline` over every token in `tokens`, producing a new map.
    ///
    /// Steps run in order; each step rewrites every matching token's base
    /// value and every theme override before the next step starts. `alias_of`
    /// is never touched. The first failure aborts the whole run and the input
    /// map is left as it was.
    ///
    /// # Errors
    ///
    /// - [`TransformError::UnknownPipeline`] if `pipeline` is not defined
    /// - [`TransformError::UnknownTransform`] if a step names an unregistered transform
    /// - whatever error a step's transform returns
    pub fn apply(
        &self,
        pipeline: &str,
        tokens: &FlatTokenMap,
    ) -> transforms::Result<FlatTokenMap> {
        let steps = self.resolve(pipeline)?;
        debug!(pipeline, steps = steps.len(), tokens = tokens.len(), "applying pipeline");

        let mut output = tokens.clone();
        for (name, step) in &steps {
            trace!(pipeline, step = %name, "running step");
            for token in output.values_mut() {
                apply_step(step.as_ref(), token)?;
            }
        }
        Ok(output)
    }

    /// Look up every step of `pipeline` before any token is touched.
    fn resolve(
        &self,
        pipeline: &str,
    ) -> transforms::Result<Vec<(&str, Arc<dyn ValueTransform>)>> {
        let names = self
            .pipelines
            .get(pipeline)
            .ok_or_else(|| TransformError::UnknownPipeline { pipeline: pipeline.to_string() })?;

        names
            .iter()
            .map(|name| {
                self.transforms
                    .get(name)
                    .map(|t| (name.as_str(), Arc::clone(t)))
                    .ok_or_else(|| TransformError::UnknownTransform {
                        pipeline: pipeline.to_string(),
                        transform: name.clone(),
                    })
            })
            .collect()
    }
}

/// Apply one step to a token's base value and to each of its theme overrides.
///
/// Overrides share the token's type, so the token's match decides for all of
/// them, and every value goes through the same `transform` call.
fn apply_step(step: &dyn ValueTransform, token: &mut ResolvedToken) -> transforms::Result<()> {
    let current: &ResolvedToken = token;
    if !step.matches(current) {
        return Ok(());
    }

    let base = step.transform(&current.value, current)?;
    let overrides = match &current.theme_values {
        Some(themes) => themes
            .iter()
            .map(|(theme, tv)| -> transforms::Result<(String, TokenValue)> {
                let value =
                    step.transform(&tv.value, current).map_err(|e| e.in_theme(theme.as_str()))?;
                Ok((theme.clone(), value))
            })
            .collect::<transforms::Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    token.value = base;
    if let Some(themes) = token.theme_values.as_mut() {
        for (theme, value) in overrides {
            if let Some(tv) = themes.get_mut(&theme) {
                tv.value = value;
            }
        }
    }
    Ok(())
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("transforms", &self.transform_names())
            .field("pipelines", &self.pipelines)
            .finish()
    }
}
