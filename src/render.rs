//! Frame composition: draws the full plot to a [`Surface`].
//!
//! A frame is always drawn from scratch in four layers: clear, grid, axes,
//! then each curve in insertion order. Rendering reads the viewport, surface
//! size, equation set and configuration; it never mutates application state.
//!
//! [`Surface`] abstracts the drawing target. The browser implementation wraps
//! a `CanvasRenderingContext2d` ([`crate::canvas2d`]); [`RecordingSurface`]
//! captures the command stream for tests and headless use.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::{Deserialize, Serialize};

use crate::config::PlotterConfig;
use crate::curve::{draw_polyline, sample_curve};
use crate::equations::EquationSet;
use crate::eval::Evaluator;
use crate::grid::{draw_axes, draw_grid};
use crate::mapper::{Point, SurfaceSize};
use crate::viewport::Viewport;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("canvas call failed: {0}")]
    Canvas(String),
}

/// Color and line width for a stroked path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Any CSS color string.
    pub color: String,
    /// Line width in CSS pixels.
    pub width: f64,
}

impl StrokeStyle {
    #[must_use]
    pub fn new(color: &str, width: f64) -> Self {
        Self { color: color.to_owned(), width }
    }
}

/// A 2D drawing target addressed in surface (CSS pixel) coordinates.
pub trait Surface {
    /// Blank the surface and prepare it for a frame of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the backend rejects the reset.
    fn clear(&mut self, size: SurfaceSize) -> Result<(), RenderError>;
    fn set_stroke(&mut self, style: &StrokeStyle);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);
}

/// Everything a frame is drawn from.
pub struct Scene<'a> {
    pub viewport: &'a Viewport,
    pub size: SurfaceSize,
    pub equations: &'a EquationSet,
    pub evaluator: &'a dyn Evaluator,
    pub config: &'a PlotterConfig,
}

/// Draw one complete frame.
///
/// # Errors
///
/// Returns `Err` if clearing the surface fails. Curve evaluation failures are
/// not errors; they only shorten the affected curve.
pub fn draw(surface: &mut dyn Surface, scene: &Scene<'_>) -> Result<(), RenderError> {
    let config = scene.config;

    // Layer 1: clear.
    surface.clear(scene.size)?;

    // Layer 2: grid.
    draw_grid(surface, scene.viewport, scene.size, config.grid_spacing, &config.grid_style);

    // Layer 3: axes.
    draw_axes(surface, scene.viewport, scene.size, &config.axis_style);

    // Layer 4: curves, first added at the bottom.
    for (index, expr) in scene.equations.iter().enumerate() {
        let subpaths = sample_curve(expr, scene.evaluator, scene.viewport, scene.size, config.gap_policy);
        draw_polyline(surface, &subpaths, config.curve_style(index));
    }

    Ok(())
}

/// Stroke a single straight segment.
pub fn stroke_line(surface: &mut dyn Surface, from: Point, to: Point) {
    surface.begin_path();
    surface.move_to(from.x, from.y);
    surface.line_to(to.x, to.y);
    surface.stroke();
}

// =============================================================
// Recording surface
// =============================================================

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(SurfaceSize),
    SetStroke(StrokeStyle),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Stroke,
}

/// A stroked path reconstructed from recorded commands.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedStroke {
    /// Style in effect when the path was stroked, if one was set.
    pub style: Option<StrokeStyle>,
    /// Each subpath starts at a move-to.
    pub subpaths: Vec<Vec<Point>>,
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Reassemble the stroked paths, in the order they were stroked.
    ///
    /// A line-to with no current subpath starts a new one, as on a canvas.
    #[must_use]
    pub fn strokes(&self) -> Vec<RecordedStroke> {
        let mut out = Vec::new();
        let mut style = None;
        let mut subpaths: Vec<Vec<Point>> = Vec::new();

        for cmd in &self.commands {
            match cmd {
                DrawCommand::Clear(_) => subpaths.clear(),
                DrawCommand::SetStroke(s) => style = Some(s.clone()),
                DrawCommand::BeginPath => subpaths.clear(),
                DrawCommand::MoveTo(p) => subpaths.push(vec![*p]),
                DrawCommand::LineTo(p) => match subpaths.last_mut() {
                    Some(path) => path.push(*p),
                    None => subpaths.push(vec![*p]),
                },
                DrawCommand::Stroke => out.push(RecordedStroke { style: style.clone(), subpaths: subpaths.clone() }),
            }
        }

        out
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, size: SurfaceSize) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Clear(size));
        Ok(())
    }

    fn set_stroke(&mut self, style: &StrokeStyle) {
        self.commands.push(DrawCommand::SetStroke(style.clone()));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(Point::new(x, y)));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(Point::new(x, y)));
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
}
