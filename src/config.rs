//! Plotter configuration.
//!
//! Every field has a default matching the classic plotter look, so a host can
//! pass a partial JSON document and only override what it cares about:
//!
//! ```json
//! { "grid_spacing": 0.5, "gap_policy": "break", "curve_palette": [{ "color": "#e44", "width": 2 }] }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    AXIS_COLOR, AXIS_WIDTH, CURVE_COLOR, CURVE_WIDTH, DEFAULT_GRID_SPACING, DEFAULT_X_MAX, DEFAULT_X_MIN,
    DEFAULT_Y_MAX, DEFAULT_Y_MIN, GRID_COLOR, GRID_WIDTH, PROBE_X, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
use crate::curve::GapPolicy;
use crate::render::StrokeStyle;
use crate::viewport::{Viewport, ViewportError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid_spacing must be finite and positive, got {0}")]
    GridSpacing(f64),
    #[error("{name} must be {expected}, got {value}")]
    ZoomFactor { name: &'static str, expected: &'static str, value: f64 },
    #[error("probe_x must be finite, got {0}")]
    ProbeX(f64),
    #[error("curve_palette must not be empty")]
    EmptyPalette,
    #[error("stroke width for {name} must be finite and positive, got {value}")]
    StrokeWidth { name: &'static str, value: f64 },
    #[error("initial view: {0}")]
    InitialView(#[from] ViewportError),
}

/// Initial graph-space bounds, as written in config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for ViewBounds {
    fn default() -> Self {
        Self { x_min: DEFAULT_X_MIN, x_max: DEFAULT_X_MAX, y_min: DEFAULT_Y_MIN, y_max: DEFAULT_Y_MAX }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotterConfig {
    pub initial_view: ViewBounds,
    pub grid_spacing: f64,
    /// Wheel-up scale, in `(0, 1)`.
    pub zoom_in_factor: f64,
    /// Wheel-down scale, greater than 1.
    pub zoom_out_factor: f64,
    /// `x` value new expressions are probed at.
    pub probe_x: f64,
    pub gap_policy: GapPolicy,
    pub grid_style: StrokeStyle,
    pub axis_style: StrokeStyle,
    /// Curves cycle through this list in insertion order.
    pub curve_palette: Vec<StrokeStyle>,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            initial_view: ViewBounds::default(),
            grid_spacing: DEFAULT_GRID_SPACING,
            zoom_in_factor: ZOOM_IN_FACTOR,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            probe_x: PROBE_X,
            gap_policy: GapPolicy::default(),
            grid_style: StrokeStyle::new(GRID_COLOR, GRID_WIDTH),
            axis_style: StrokeStyle::new(AXIS_COLOR, AXIS_WIDTH),
            curve_palette: vec![StrokeStyle::new(CURVE_COLOR, CURVE_WIDTH)],
        }
    }
}

impl PlotterConfig {
    /// Parse and validate a JSON config document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields, and
    /// the matching validation error for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.initial_viewport()?;

        if !(self.grid_spacing.is_finite() && self.grid_spacing > 0.0) {
            return Err(ConfigError::GridSpacing(self.grid_spacing));
        }
        if !(self.zoom_in_factor > 0.0 && self.zoom_in_factor < 1.0) {
            return Err(ConfigError::ZoomFactor {
                name: "zoom_in_factor",
                expected: "in (0, 1)",
                value: self.zoom_in_factor,
            });
        }
        if !(self.zoom_out_factor.is_finite() && self.zoom_out_factor > 1.0) {
            return Err(ConfigError::ZoomFactor {
                name: "zoom_out_factor",
                expected: "finite and greater than 1",
                value: self.zoom_out_factor,
            });
        }
        if !self.probe_x.is_finite() {
            return Err(ConfigError::ProbeX(self.probe_x));
        }
        if self.curve_palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        check_width("grid_style", &self.grid_style)?;
        check_width("axis_style", &self.axis_style)?;
        for style in &self.curve_palette {
            check_width("curve_palette", style)?;
        }
        Ok(())
    }

    /// The configured starting viewport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InitialView`] if the bounds are degenerate.
    pub fn initial_viewport(&self) -> Result<Viewport, ConfigError> {
        let b = self.initial_view;
        Ok(Viewport::new(b.x_min, b.x_max, b.y_min, b.y_max)?)
    }

    /// Stroke style for the curve at `index` in draw order.
    #[must_use]
    pub fn curve_style(&self, index: usize) -> &StrokeStyle {
        match self.curve_palette.len() {
            0 => &self.axis_style,
            n => &self.curve_palette[index % n],
        }
    }
}

fn check_width(name: &'static str, style: &StrokeStyle) -> Result<(), ConfigError> {
    if style.width.is_finite() && style.width > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::StrokeWidth { name, value: style.width })
    }
}
