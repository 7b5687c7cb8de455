use web_sys::HtmlCanvasElement;

use crate::canvas2d::{Canvas2dSurface, js_error};
use crate::config::{ConfigError, PlotterConfig};
use crate::consts::{CURSOR_DEFAULT, CURSOR_GRABBING};
use crate::equations::{AddError, EquationSet};
use crate::eval::Evaluator;
use crate::expr::ExprEvaluator;
use crate::input::{InputState, WheelDelta};
use crate::mapper::{Point, SurfaceSize, to_graph};
use crate::render::{self, RenderError, Scene, Surface};
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Set the CSS cursor on the drawing surface.
    SetCursor(String),
    /// State changed; the frame must be redrawn.
    RenderNeeded,
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub viewport: Viewport,
    pub size: SurfaceSize,
    pub dpr: f64,
    pub equations: EquationSet,
    pub input: InputState,
    pub config: PlotterConfig,
    evaluator: Box<dyn Evaluator>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_evaluator(Box::new(ExprEvaluator))
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with a caller-supplied evaluator.
    #[must_use]
    pub fn with_evaluator(evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            viewport: Viewport::default(),
            size: SurfaceSize::default(),
            dpr: 1.0,
            equations: EquationSet::new(),
            input: InputState::default(),
            config: PlotterConfig::default(),
            evaluator,
        }
    }

    /// Build from a configuration, starting at its initial view.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration does not validate.
    pub fn with_config(config: PlotterConfig, evaluator: Box<dyn Evaluator>) -> Result<Self, ConfigError> {
        config.validate()?;
        let viewport = config.initial_viewport()?;
        Ok(Self { viewport, config, ..Self::with_evaluator(evaluator) })
    }

    // --- Surface ---

    /// Update surface dimensions (CSS pixels) and device pixel ratio.
    ///
    /// The viewport bounds are unchanged: the same graph rectangle is
    /// stretched over the new surface.
    pub fn set_viewport(&mut self, width: u32, height: u32, dpr: f64) -> Vec<Action> {
        self.size = SurfaceSize::new(width, height);
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    /// Start a pan gesture anchored at the graph point under the pointer.
    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        let was_dragging = self.input.is_dragging();
        let anchor = to_graph(screen_pt, &self.viewport, self.size);
        self.input = InputState::Dragging { anchor };
        if was_dragging { Vec::new() } else { vec![Action::SetCursor(CURSOR_GRABBING.to_owned())] }
    }

    /// Pan so the drag anchor sits under the pointer again.
    ///
    /// The anchor is fixed for the whole drag; only the viewport moves.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Dragging { anchor } = self.input else {
            return Vec::new();
        };
        let under_pointer = to_graph(screen_pt, &self.viewport, self.size);
        self.viewport.pan(anchor.x - under_pointer.x, anchor.y - under_pointer.y);
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point) -> Vec<Action> {
        self.end_drag()
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_drag()
    }

    /// Zoom around the graph point under the pointer. Does not touch the drag state.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        let anchor = to_graph(screen_pt, &self.viewport, self.size);
        let scale = if delta.is_zoom_in() { self.config.zoom_in_factor } else { self.config.zoom_out_factor };
        self.viewport.zoom(anchor, scale);
        vec![Action::RenderNeeded]
    }

    fn end_drag(&mut self) -> Vec<Action> {
        if !self.input.is_dragging() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::SetCursor(CURSOR_DEFAULT.to_owned())]
    }

    // --- Equations ---

    /// Add an expression after a duplicate check and a probe evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`AddError`] when the expression is a duplicate or fails the probe.
    pub fn add_expression(&mut self, expr: &str) -> Result<Vec<Action>, AddError> {
        self.equations.try_add(expr, self.evaluator.as_ref(), self.config.probe_x)?;
        Ok(vec![Action::RenderNeeded])
    }

    /// Drop the most recently added expression. No redraw when already empty.
    pub fn remove_last(&mut self) -> Vec<Action> {
        match self.equations.remove_last() {
            Some(_) => vec![Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    pub fn clear_expressions(&mut self) -> Vec<Action> {
        self.equations.clear();
        vec![Action::RenderNeeded]
    }

    // --- Render ---

    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            viewport: &self.viewport,
            size: self.size,
            equations: &self.equations,
            evaluator: self.evaluator.as_ref(),
            config: &self.config,
        }
    }

    /// Draw the current state to `surface`.
    ///
    /// # Errors
    ///
    /// Propagates [`RenderError`] from the surface.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<(), RenderError> {
        render::draw(surface, &self.scene())
    }

    // --- Queries ---

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }
}

/// The full plotting engine. Wraps `EngineCore` and owns the browser canvas element.
///
/// Every handler dispatches the core's actions immediately: cursor changes
/// are applied to the canvas and a requested redraw happens synchronously,
/// at most once per handler call.
pub struct Engine {
    canvas: HtmlCanvasElement,
    surface: Canvas2dSurface,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, core: EngineCore) -> Result<Self, RenderError> {
        let surface = Canvas2dSurface::from_canvas(&canvas, core.dpr)?;
        Ok(Self { canvas, surface, core })
    }

    // --- Viewport ---

    /// Resize to `width` x `height` CSS pixels at the given device pixel ratio.
    ///
    /// The canvas backing store is sized in device pixels.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the redraw fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width: u32, height: u32, dpr: f64) -> Result<(), RenderError> {
        let actions = self.core.set_viewport(width, height, dpr);
        let dpr = self.core.dpr;
        self.canvas.set_width((self.core.size.width_f64() * dpr).round() as u32);
        self.canvas.set_height((self.core.size.height_f64() * dpr).round() as u32);
        self.surface.set_dpr(dpr);
        self.dispatch(&actions)
    }

    // --- Input events ---

    /// # Errors
    ///
    /// Returns [`RenderError`] if applying the resulting actions fails.
    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Result<(), RenderError> {
        let actions = self.core.on_pointer_down(screen_pt);
        self.dispatch(&actions)
    }

    /// # Errors
    ///
    /// Returns [`RenderError`] if the redraw fails.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Result<(), RenderError> {
        let actions = self.core.on_pointer_move(screen_pt);
        self.dispatch(&actions)
    }

    /// # Errors
    ///
    /// Returns [`RenderError`] if the cursor cannot be reset.
    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Result<(), RenderError> {
        let actions = self.core.on_pointer_up(screen_pt);
        self.dispatch(&actions)
    }

    /// # Errors
    ///
    /// Returns [`RenderError`] if the cursor cannot be reset.
    pub fn on_pointer_leave(&mut self) -> Result<(), RenderError> {
        let actions = self.core.on_pointer_leave();
        self.dispatch(&actions)
    }

    /// # Errors
    ///
    /// Returns [`RenderError`] if the redraw fails.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Result<(), RenderError> {
        let actions = self.core.on_wheel(screen_pt, delta);
        self.dispatch(&actions)
    }

    // --- Equations ---

    /// Returns whether the expression was added. Rejections are logged, not surfaced.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the redraw fails.
    pub fn add_expression(&mut self, expr: &str) -> Result<bool, RenderError> {
        match self.core.add_expression(expr) {
            Ok(actions) => {
                self.dispatch(&actions)?;
                Ok(true)
            }
            Err(err) => {
                log::debug!("not adding '{expr}': {err}");
                Ok(false)
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`RenderError`] if the redraw fails.
    pub fn remove_last(&mut self) -> Result<(), RenderError> {
        let actions = self.core.remove_last();
        self.dispatch(&actions)
    }

    /// # Errors
    ///
    /// Returns [`RenderError`] if the redraw fails.
    pub fn clear_expressions(&mut self) -> Result<(), RenderError> {
        let actions = self.core.clear_expressions();
        self.dispatch(&actions)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the canvas rejects the frame reset.
    pub fn render(&mut self) -> Result<(), RenderError> {
        self.core.render(&mut self.surface)
    }

    fn dispatch(&mut self, actions: &[Action]) -> Result<(), RenderError> {
        let mut render_needed = false;
        for action in actions {
            match action {
                Action::SetCursor(cursor) => self.canvas.style().set_property("cursor", cursor).map_err(js_error)?,
                Action::RenderNeeded => render_needed = true,
            }
        }
        if render_needed {
            self.render()?;
        }
        Ok(())
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport()
    }

    #[must_use]
    pub fn equations(&self) -> &EquationSet {
        &self.core.equations
    }
}
