//! Curve sampling and stroking.
//!
//! A curve is sampled once per pixel column: the column's graph x is fed to
//! the evaluator and the result mapped back onto the surface. Successful
//! samples are joined into a polyline.

#[cfg(test)]
#[path = "curve_test.rs"]
mod curve_test;

use serde::{Deserialize, Serialize};

use crate::eval::Evaluator;
use crate::mapper::{Point, SurfaceSize, graph_x_of_pixel_x, to_surface};
use crate::render::{StrokeStyle, Surface};
use crate::viewport::Viewport;

/// What a curve scan does when the evaluator fails at a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Abandon the rest of the scan. A single undefined point (an asymptote,
    /// a domain edge) hides everything to its right.
    #[default]
    Stop,
    /// Skip the failing column and start a new subpath at the next success.
    Break,
}

/// Sample `expr` across every pixel column of the surface.
///
/// Returns subpaths in surface coordinates; each subpath begins with a
/// move-to. Columns whose value is not finite are skipped without breaking
/// the current subpath. Evaluation errors are handled per `policy`.
#[must_use]
pub fn sample_curve(
    expr: &str,
    evaluator: &dyn Evaluator,
    viewport: &Viewport,
    size: SurfaceSize,
    policy: GapPolicy,
) -> Vec<Vec<Point>> {
    let mut subpaths: Vec<Vec<Point>> = Vec::new();
    let mut pen_down = false;

    for column in 0..size.width {
        let gx = graph_x_of_pixel_x(f64::from(column), viewport, size);
        match evaluator.evaluate(expr, gx) {
            Ok(gy) if gy.is_finite() => {
                let p = to_surface(Point::new(gx, gy), viewport, size);
                if pen_down {
                    if let Some(path) = subpaths.last_mut() {
                        path.push(p);
                    }
                } else {
                    subpaths.push(vec![p]);
                    pen_down = true;
                }
            }
            Ok(_) => {}
            Err(err) => match policy {
                GapPolicy::Stop => {
                    log::trace!("curve '{expr}' stopped at x = {gx}: {err}");
                    break;
                }
                GapPolicy::Break => pen_down = false,
            },
        }
    }

    subpaths
}

/// Stroke sampled subpaths as a single path. Draws nothing for an empty curve.
pub fn draw_polyline(surface: &mut dyn Surface, subpaths: &[Vec<Point>], style: &StrokeStyle) {
    if subpaths.iter().all(Vec::is_empty) {
        return;
    }

    surface.set_stroke(style);
    surface.begin_path();
    for path in subpaths {
        let mut points = path.iter();
        if let Some(first) = points.next() {
            surface.move_to(first.x, first.y);
        }
        for p in points {
            surface.line_to(p.x, p.y);
        }
    }
    surface.stroke();
}
