#![allow(clippy::float_cmp)]

use super::*;

// --- Defaults ---

#[test]
fn default_config_is_valid() {
    assert!(PlotterConfig::default().validate().is_ok());
}

#[test]
fn default_values() {
    let config = PlotterConfig::default();
    assert_eq!(config.initial_view, ViewBounds { x_min: -10.0, x_max: 10.0, y_min: -5.0, y_max: 5.0 });
    assert_eq!(config.grid_spacing, 1.0);
    assert_eq!(config.zoom_in_factor, 0.9);
    assert_eq!(config.zoom_out_factor, 1.1);
    assert_eq!(config.probe_x, 0.0);
    assert_eq!(config.gap_policy, GapPolicy::Stop);
    assert_eq!(config.grid_style, StrokeStyle::new("#ddd", 0.5));
    assert_eq!(config.axis_style, StrokeStyle::new("#999", 2.0));
    assert_eq!(config.curve_palette, vec![StrokeStyle::new("#77f", 3.0)]);
}

#[test]
fn default_initial_viewport() {
    let vp = PlotterConfig::default().initial_viewport().unwrap();
    assert_eq!(vp, Viewport::default());
}

// --- from_json ---

#[test]
fn empty_object_gives_defaults() {
    assert_eq!(PlotterConfig::from_json("{}").unwrap(), PlotterConfig::default());
}

#[test]
fn partial_override() {
    let config = PlotterConfig::from_json(r#"{ "grid_spacing": 0.5, "gap_policy": "break" }"#).unwrap();
    assert_eq!(config.grid_spacing, 0.5);
    assert_eq!(config.gap_policy, GapPolicy::Break);
    assert_eq!(config.zoom_in_factor, 0.9);
}

#[test]
fn custom_initial_view() {
    let config =
        PlotterConfig::from_json(r#"{ "initial_view": { "x_min": 0, "x_max": 1, "y_min": -2, "y_max": 2 } }"#)
            .unwrap();
    let vp = config.initial_viewport().unwrap();
    assert_eq!([vp.x_min(), vp.x_max(), vp.y_min(), vp.y_max()], [0.0, 1.0, -2.0, 2.0]);
}

#[test]
fn custom_palette() {
    let config = PlotterConfig::from_json(
        r##"{ "curve_palette": [{ "color": "#e44", "width": 2 }, { "color": "#4a4", "width": 1.5 }] }"##,
    )
    .unwrap();
    assert_eq!(config.curve_palette.len(), 2);
    assert_eq!(config.curve_palette[1], StrokeStyle::new("#4a4", 1.5));
}

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(PlotterConfig::from_json("{ grid_spacing: 1 }"), Err(ConfigError::Parse(_))));
}

#[test]
fn unknown_field_is_parse_error() {
    assert!(matches!(PlotterConfig::from_json(r#"{ "zoom": 2 }"#), Err(ConfigError::Parse(_))));
}

#[test]
fn wrong_type_is_parse_error() {
    assert!(matches!(PlotterConfig::from_json(r#"{ "grid_spacing": "1" }"#), Err(ConfigError::Parse(_))));
}

// --- validate ---

#[test]
fn zero_grid_spacing_is_rejected() {
    let err = PlotterConfig::from_json(r#"{ "grid_spacing": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::GridSpacing(v) if v == 0.0));
}

#[test]
fn zoom_in_factor_must_be_below_one() {
    let err = PlotterConfig::from_json(r#"{ "zoom_in_factor": 1.0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZoomFactor { name: "zoom_in_factor", .. }));
}

#[test]
fn zoom_in_factor_must_be_positive() {
    let err = PlotterConfig::from_json(r#"{ "zoom_in_factor": -0.5 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZoomFactor { name: "zoom_in_factor", .. }));
}

#[test]
fn zoom_out_factor_must_exceed_one() {
    let err = PlotterConfig::from_json(r#"{ "zoom_out_factor": 0.9 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZoomFactor { name: "zoom_out_factor", .. }));
}

#[test]
fn degenerate_initial_view_is_rejected() {
    let err = PlotterConfig::from_json(r#"{ "initial_view": { "x_min": 1, "x_max": 1, "y_min": 0, "y_max": 1 } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::InitialView(ViewportError::Degenerate { .. })));
}

#[test]
fn empty_palette_is_rejected() {
    let err = PlotterConfig::from_json(r#"{ "curve_palette": [] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyPalette));
}

#[test]
fn non_positive_stroke_width_is_rejected() {
    let err = PlotterConfig::from_json(r##"{ "axis_style": { "color": "#000", "width": 0 } }"##).unwrap_err();
    assert!(matches!(err, ConfigError::StrokeWidth { name: "axis_style", .. }));
}

#[test]
fn non_finite_probe_is_rejected() {
    let config = PlotterConfig { probe_x: f64::NAN, ..PlotterConfig::default() };
    assert!(matches!(config.validate(), Err(ConfigError::ProbeX(_))));
}

#[test]
fn config_error_display() {
    let err = PlotterConfig::from_json(r#"{ "zoom_out_factor": 0.5 }"#).unwrap_err();
    assert_eq!(err.to_string(), "zoom_out_factor must be finite and greater than 1, got 0.5");
}

// --- curve_style ---

#[test]
fn curve_style_cycles_palette() {
    let config = PlotterConfig {
        curve_palette: vec![StrokeStyle::new("a", 1.0), StrokeStyle::new("b", 1.0), StrokeStyle::new("c", 1.0)],
        ..PlotterConfig::default()
    };
    let colors: Vec<&str> = (0..7).map(|i| config.curve_style(i).color.as_str()).collect();
    assert_eq!(colors, ["a", "b", "c", "a", "b", "c", "a"]);
}

#[test]
fn curve_style_with_empty_palette_falls_back_to_axis_style() {
    let config = PlotterConfig { curve_palette: Vec::new(), ..PlotterConfig::default() };
    assert_eq!(config.curve_style(0), &config.axis_style);
}

#[test]
fn config_serializes_back_to_json() {
    let json = serde_json::to_string(&PlotterConfig::default()).unwrap();
    assert_eq!(PlotterConfig::from_json(&json).unwrap(), PlotterConfig::default());
}
