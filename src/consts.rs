//! Shared numeric constants and style defaults for the plotter.

// ── Viewport ────────────────────────────────────────────────────

/// Left edge of the initial viewport, in graph units.
pub const DEFAULT_X_MIN: f64 = -10.0;

/// Right edge of the initial viewport, in graph units.
pub const DEFAULT_X_MAX: f64 = 10.0;

/// Bottom edge of the initial viewport, in graph units.
pub const DEFAULT_Y_MIN: f64 = -5.0;

/// Top edge of the initial viewport, in graph units.
pub const DEFAULT_Y_MAX: f64 = 5.0;

// ── Grid ────────────────────────────────────────────────────────

/// Graph-space distance between adjacent grid lines.
pub const DEFAULT_GRID_SPACING: f64 = 1.0;

/// Upper bound on lines drawn by a single grid pass.
pub const MAX_GRID_LINES: u64 = 4096;

// ── Expressions ─────────────────────────────────────────────────

/// Deepest nesting the built-in parser accepts before rejecting the input.
pub const MAX_EXPR_DEPTH: usize = 256;

// ── Interaction ─────────────────────────────────────────────────

/// Scale applied to the viewport when the wheel moves up / forward.
pub const ZOOM_IN_FACTOR: f64 = 0.9;

/// Scale applied to the viewport when the wheel moves down / backward.
pub const ZOOM_OUT_FACTOR: f64 = 1.1;

/// Value of `x` used to probe a new expression before accepting it.
pub const PROBE_X: f64 = 0.0;

/// CSS cursor shown while a drag is in progress.
pub const CURSOR_GRABBING: &str = "grabbing";

/// CSS cursor restored when a drag ends.
pub const CURSOR_DEFAULT: &str = "default";

// ── Styles ──────────────────────────────────────────────────────

pub const GRID_COLOR: &str = "#ddd";
pub const GRID_WIDTH: f64 = 0.5;

pub const AXIS_COLOR: &str = "#999";
pub const AXIS_WIDTH: f64 = 2.0;

pub const CURVE_COLOR: &str = "#77f";
pub const CURVE_WIDTH: f64 = 3.0;
