//! Background grid and axes.
//!
//! Grid lines sit at integer multiples of the grid spacing in graph space and
//! span the full surface. Axes are the two lines through graph `x = 0` and
//! `y = 0`, drawn after the grid in a heavier style.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::consts::MAX_GRID_LINES;
use crate::mapper::{Point, SurfaceSize, to_surface};
use crate::render::{StrokeStyle, Surface, stroke_line};
use crate::viewport::Viewport;

/// Graph-space positions of grid lines in `[min, max]`.
///
/// The first line is `ceil(min / step) * step`; lines follow every `step` up to
/// and including `max`. `step` is `spacing` unless that would give more than
/// [`MAX_GRID_LINES`] lines, in which case it is the smallest power-of-two
/// multiple of `spacing` that fits, so every drawn line still sits on a
/// multiple of `spacing`. Returns nothing for a non-positive spacing.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn grid_positions(min: f64, max: f64, spacing: f64) -> Vec<f64> {
    if !(spacing.is_finite() && spacing > 0.0) || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let Some(step) = thinned_step(min, max, spacing) else {
        return Vec::new();
    };
    let first = (min / step).ceil() * step;
    if first > max {
        return Vec::new();
    }
    let count = ((max - first) / step).floor() + 1.0;
    (0..count as u64)
        .take(MAX_GRID_LINES as usize)
        .map(|k| first + k as f64 * step)
        .filter(|v| *v <= max)
        .collect()
}

/// Line step for `[min, max]`: `spacing` doubled until one pass fits in
/// [`MAX_GRID_LINES`]. `None` when the line count is not representable.
#[allow(clippy::cast_precision_loss)]
fn thinned_step(min: f64, max: f64, spacing: f64) -> Option<f64> {
    let lines = (max - min) / spacing + 1.0;
    if !lines.is_finite() {
        log::debug!("skipping grid pass: spacing {spacing} over [{min}, {max}]");
        return None;
    }
    let cap = MAX_GRID_LINES as f64;
    if lines <= cap {
        return Some(spacing);
    }
    let step = spacing * (lines / cap).log2().ceil().exp2();
    log::trace!("thinning grid over [{min}, {max}] from {spacing} to {step}");
    step.is_finite().then_some(step)
}

/// Draw vertical then horizontal grid lines as one stroked path.
pub fn draw_grid(surface: &mut dyn Surface, viewport: &Viewport, size: SurfaceSize, spacing: f64, style: &StrokeStyle) {
    let w = size.width_f64();
    let h = size.height_f64();

    surface.set_stroke(style);
    surface.begin_path();

    for gx in grid_positions(viewport.x_min(), viewport.x_max(), spacing) {
        let px = to_surface(Point::new(gx, 0.0), viewport, size).x;
        surface.move_to(px, 0.0);
        surface.line_to(px, h);
    }

    for gy in grid_positions(viewport.y_min(), viewport.y_max(), spacing) {
        let py = to_surface(Point::new(0.0, gy), viewport, size).y;
        surface.move_to(0.0, py);
        surface.line_to(w, py);
    }

    surface.stroke();
}

/// Draw the y axis (through graph x = 0) and the x axis (through graph y = 0).
///
/// Both are drawn even when the origin is off-screen; the surface clips them.
pub fn draw_axes(surface: &mut dyn Surface, viewport: &Viewport, size: SurfaceSize, style: &StrokeStyle) {
    let origin = to_surface(Point::new(0.0, 0.0), viewport, size);

    surface.set_stroke(style);
    stroke_line(surface, Point::new(origin.x, 0.0), Point::new(origin.x, size.height_f64()));
    stroke_line(surface, Point::new(0.0, origin.y), Point::new(size.width_f64(), origin.y));
}
