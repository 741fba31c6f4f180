//! Built-in transforms and pipeline presets
//!
//! | pipeline    | color steps                     | dimension step |
//! |-------------|---------------------------------|----------------|
//! | `default`   | `color/css`                     | `dimension/px` |
//! | `web`       | `color/css`, `color/hex`        | `dimension/px` |
//! | `web/rgb`   | `color/css`, `color/rgb`        | `dimension/px` |
//! | `web/oklch` | `color/css`, `color/oklch`      | `dimension/px` |
//! | `ios`       | `color/css`, `color/hex8argb`   | `dimension/px` |
//! | `android`   | `color/css`, `color/hex8argb`   | `dimension/px` |

use crate::registry::TransformRegistry;

use super::color::{ColorTransform, COLOR_FORMATS};
use super::dimension::{DimensionPx, DIMENSION_PX};

/// Preset pipelines, in definition order.
pub const PRESETS: &[(&str, &[&str])] = &[
    ("default", &["color/css", DIMENSION_PX]),
    ("web", &["color/css", "color/hex", DIMENSION_PX]),
    ("web/rgb", &["color/css", "color/rgb", DIMENSION_PX]),
    ("web/oklch", &["color/css", "color/oklch", DIMENSION_PX]),
    // ios and android currently share the ARGB rendering
    ("ios", &["color/css", "color/hex8argb", DIMENSION_PX]),
    ("android", &["color/css", "color/hex8argb", DIMENSION_PX]),
];

/// Register every built-in transform and define every preset pipeline.
pub fn register_builtins(registry: &mut TransformRegistry) {
    for format in COLOR_FORMATS {
        registry.register(format.transform_name(), ColorTransform::new(format));
    }
    registry.register(DIMENSION_PX, DimensionPx);

    for (name, steps) in PRESETS {
        registry.define(*name, steps.iter().copied());
    }
}
