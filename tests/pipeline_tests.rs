//! End-to-end tests for the token pipeline: load, apply, format.
//!
//! These exercise the public library API the way a build does, using the
//! preset pipelines and small hand-written token maps.

use serde_json::{json, Value};
use shift::format::{format_css, format_json, format_typescript, FormatOptions, Formatter};
use shift::models::{
    token_map, ColorSpace, ColorValue, DimensionValue, FlatTokenMap, ResolvedToken, ThemeConfig,
    ThemeValue, TokenValue,
};
use shift::tokens::parse_tokens;
use shift::transforms::{TransformError, ValueTransformDef};
use shift::{FormatKind, TransformRegistry};
use std::path::Path;

fn themes() -> ThemeConfig {
    ThemeConfig::from([
        ("dark".to_string(), "[data-theme=\"dark\"]".to_string()),
        ("contrast".to_string(), ".hc".to_string()),
    ])
}

fn palette() -> FlatTokenMap {
    token_map([
        ResolvedToken::new(&["colors", "bg"], "color", "#FFFFFF")
            .with_alias("base.white")
            .with_theme("dark", ThemeValue::new("#11223344").with_alias("base.ink")),
        ResolvedToken::new(&["colors", "accent"], "color", "rgb(51 102 204)"),
        ResolvedToken::new(&["spacing", "md"], "dimension", 16),
        ResolvedToken::new(&["spacing", "lg"], "dimension", DimensionValue::new(1.5, "rem")),
        ResolvedToken::new(&["font", "body"], "fontFamily", "Inter, sans-serif"),
    ])
}

fn parse(text: &str) -> Value {
    serde_json::from_str(text).expect("formatter output should be JSON")
}

// ============================================================================
// Registry laws
// ============================================================================

#[test]
fn test_empty_pipeline_is_identity() {
    let mut registry = TransformRegistry::with_builtins();
    registry.define("none", Vec::<String>::new());

    let input = palette();
    let output = registry.apply("none", &input).unwrap();
    assert_eq!(output, input);
}

#[test]
fn test_composed_pipeline_equals_sequential_application() {
    let mut registry = TransformRegistry::with_builtins();
    registry.define("first", ["color/css"]);
    registry.define("second", ["color/oklch", "dimension/px"]);
    registry.define("both", ["color/css", "color/oklch", "dimension/px"]);

    let input = palette();
    let sequential = registry.apply("second", &registry.apply("first", &input).unwrap()).unwrap();
    assert_eq!(registry.apply("both", &input).unwrap(), sequential);
}

#[test]
fn test_presets_are_idempotent() {
    let registry = TransformRegistry::with_builtins();
    for pipeline in ["default", "web", "web/rgb", "web/oklch"] {
        let once = registry.apply(pipeline, &palette()).unwrap();
        let twice = registry.apply(pipeline, &once).unwrap();
        assert_eq!(once, twice, "{} should be idempotent", pipeline);
    }
}

#[test]
fn test_argb_pipeline_reapplied_rotates_alpha() {
    // hex8 input is read as RGBA, so a second ARGB pass moves the alpha byte again
    let registry = TransformRegistry::with_builtins();
    let translucent = token_map([ResolvedToken::new(&["colors", "veil"], "color", "#3366cc80")
        .with_theme("dark", ThemeValue::new("#11223344"))]);

    let once = registry.apply("ios", &translucent).unwrap();
    let twice = registry.apply("ios", &once).unwrap();

    assert_eq!(once["colors.veil"].value, TokenValue::from("#803366cc"));
    assert_eq!(twice["colors.veil"].value, TokenValue::from("#cc803366"));
    assert_eq!(once["colors.veil"].theme_value("dark").unwrap().value, TokenValue::from("#44112233"));
    assert_eq!(twice["colors.veil"].theme_value("dark").unwrap().value, TokenValue::from("#33441122"));
    assert_ne!(once, twice);

    // opaque output is eight digits too, so it rotates the same way
    let opaque = registry.apply("ios", &registry.apply("ios", &palette()).unwrap()).unwrap();
    assert_eq!(opaque["colors.accent"].value, TokenValue::from("#ccff3366"));
}

#[test]
fn test_input_map_untouched() {
    let registry = TransformRegistry::with_builtins();
    let input = palette();
    let before = input.clone();
    let _ = registry.apply("web", &input).unwrap();
    assert_eq!(input, before);
}

#[test]
fn test_unknown_pipeline() {
    let registry = TransformRegistry::with_builtins();
    let err = registry.apply("print", &palette()).unwrap_err();
    assert_eq!(err, TransformError::UnknownPipeline { pipeline: "print".to_string() });
}

#[test]
fn test_custom_transform_runs_alongside_presets() {
    let mut registry = TransformRegistry::with_builtins();
    registry.register(
        "font/quote",
        ValueTransformDef::new(
            |token| token.token_type.as_str() == "fontFamily",
            |value, _| Ok(TokenValue::String(format!("'{}'", value))),
        ),
    );
    registry.define("web/fonts", ["color/css", "color/hex", "dimension/px", "font/quote"]);

    let output = registry.apply("web/fonts", &palette()).unwrap();
    assert_eq!(output["font.body"].value, TokenValue::from("'Inter, sans-serif'"));
    assert_eq!(output["colors.bg"].value, TokenValue::from("#ffffff"));
}

// ============================================================================
// Preset behavior
// ============================================================================

#[test]
fn test_web_pipeline() {
    let output = TransformRegistry::with_builtins().apply("web", &palette()).unwrap();

    assert_eq!(output["colors.bg"].value, TokenValue::from("#ffffff"));
    assert_eq!(output["colors.accent"].value, TokenValue::from("#3366cc"));
    assert_eq!(output["spacing.md"].value, TokenValue::from("16px"));
    assert_eq!(output["spacing.lg"].value, TokenValue::from("1.5rem"));
    assert_eq!(output["font.body"].value, TokenValue::from("Inter, sans-serif"));

    let dark = output["colors.bg"].theme_value("dark").unwrap();
    assert_eq!(dark.value, TokenValue::from("#11223344"));
    assert_eq!(dark.alias_of.as_deref(), Some("base.ink"));
    assert_eq!(output["colors.bg"].alias_of.as_deref(), Some("base.white"));
}

#[test]
fn test_hex8_channel_orders() {
    let registry = TransformRegistry::with_builtins();
    let mut with_rgba = TransformRegistry::with_builtins();
    with_rgba.define("rgba", ["color/css", "color/hex8rgba"]);

    let ios = registry.apply("ios", &palette()).unwrap();
    let rgba = with_rgba.apply("rgba", &palette()).unwrap();

    let ios_dark = &ios["colors.bg"].theme_value("dark").unwrap().value;
    let rgba_dark = &rgba["colors.bg"].theme_value("dark").unwrap().value;
    assert_eq!(ios_dark, &TokenValue::from("#44112233"));
    assert_eq!(rgba_dark, &TokenValue::from("#11223344"));
    assert_eq!(ios["colors.bg"].value, TokenValue::from("#ffffffff"));
}

#[test]
fn test_android_matches_ios() {
    let registry = TransformRegistry::with_builtins();
    assert_eq!(
        registry.apply("android", &palette()).unwrap(),
        registry.apply("ios", &palette()).unwrap()
    );
}

#[test]
fn test_structured_color_rendered() {
    let tokens = token_map([ResolvedToken::new(
        &["brand"],
        "color",
        ColorValue { color_space: ColorSpace::Srgb, components: [1.0, 0.0, 0.0], alpha: None },
    )]);
    let output = TransformRegistry::with_builtins().apply("default", &tokens).unwrap();
    assert_eq!(output["brand"].value, TokenValue::from("#ff0000"));
}

#[test]
fn test_bad_dimension_fails_whole_apply() {
    let tokens = token_map([
        ResolvedToken::new(&["a"], "dimension", 4),
        ResolvedToken::new(&["b"], "dimension", "wide"),
    ]);
    let err = TransformRegistry::with_builtins().apply("web", &tokens).unwrap_err();
    assert_eq!(err.path(), Some("b"));
    assert!(err.to_string().contains("dimension/px"));
}

// ============================================================================
// Formatting
// ============================================================================

#[test]
fn test_json_nests_by_raw_path() {
    let output = TransformRegistry::with_builtins().apply("web", &palette()).unwrap();
    let json = parse(&format_json(&output, None).unwrap());

    assert_eq!(
        json,
        json!({
            "colors": { "accent": "#3366cc", "bg": "#ffffff" },
            "font": { "body": "Inter, sans-serif" },
            "spacing": { "lg": "1.5rem", "md": "16px" }
        })
    );
}

#[test]
fn test_themes_presence() {
    let plain = token_map([ResolvedToken::new(&["a"], "number", 1)]);
    let themed = palette();

    // no theme config
    assert!(parse(&format_json(&themed, None).unwrap()).get("$themes").is_none());
    // config but no overrides
    assert!(parse(&format_json(&plain, Some(&themes())).unwrap()).get("$themes").is_none());
    // config and overrides: every configured theme appears
    let json = parse(&format_json(&themed, Some(&themes())).unwrap());
    assert_eq!(json["$themes"]["dark"]["colors"]["bg"], "#11223344");
    assert_eq!(json["$themes"]["contrast"], json!({}));
}

#[test]
fn test_empty_map_formats() {
    let empty = FlatTokenMap::new();
    assert_eq!(format_json(&empty, Some(&themes())).unwrap(), "{}");
    assert_eq!(format_typescript(&empty, None).unwrap(), "export const tokens = {} as const\n");
    assert_eq!(format_css(&empty, None).unwrap(), ":root {}\n");
}

#[test]
fn test_typescript_wraps_json() {
    let output = TransformRegistry::with_builtins().apply("web", &palette()).unwrap();
    let ts = format_typescript(&output, Some(&themes())).unwrap();

    assert!(ts.starts_with("export const tokens = {"));
    assert!(ts.contains("} as const\n\nexport const themes = {"));
    assert!(ts.ends_with("} as const\n"));
    assert!(!ts.contains("aliasOf"));
}

#[test]
fn test_format_kind_dispatch() {
    let output = TransformRegistry::with_builtins().apply("web", &palette()).unwrap();
    let compact = FormatOptions { pretty: false };

    let css = FormatKind::Css.formatter().format(&output, Some(&themes()), &compact).unwrap();
    assert!(css.starts_with(":root{--colors-accent:#3366cc;--colors-bg:#ffffff;"));
    assert!(css.contains("[data-theme=\"dark\"]{--colors-bg:#11223344;}"));
    assert!(!css.contains(".hc"));

    assert_eq!(FormatKind::Typescript.formatter().extension(), "ts");
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_transform_format() {
    let text = r##"{
        "colors.bg": {
            "path": "colors.bg",
            "rawPath": ["colors", "bg"],
            "type": "color",
            "value": "oklch(100% 0 0)",
            "aliasOf": "base.white",
            "themeValues": { "dark": { "value": "black", "aliasOf": "base.black" } }
        },
        "radius.sm": { "path": "radius.sm", "rawPath": ["radius", "sm"], "type": "dimension", "value": 2 }
    }"##;
    let tokens = parse_tokens(text, Path::new("tokens.json")).unwrap();
    let output = TransformRegistry::with_builtins().apply("web", &tokens).unwrap();
    let json = parse(&format_json(&output, Some(&themes())).unwrap());

    assert_eq!(json["colors"]["bg"], "#ffffff");
    assert_eq!(json["radius"]["sm"], "2px");
    assert_eq!(json["$themes"]["dark"]["colors"]["bg"], "#000000");
}
