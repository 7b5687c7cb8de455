//! JavaScript-facing bindings.
//!
//! The host page creates one [`Plotter`] per canvas and forwards DOM events to
//! it. Everything else (event wiring, the expression input box, resize
//! observation) stays in JavaScript.

use js_sys::Function;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use crate::config::PlotterConfig;
use crate::engine::{Engine, EngineCore};
use crate::eval::{EvalError, Evaluator};
use crate::expr::ExprEvaluator;
use crate::input::WheelDelta;
use crate::mapper::Point;
use crate::render::RenderError;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn render_failed(err: RenderError) -> JsValue {
    log::warn!("render failed: {err}");
    to_js(err)
}

fn offset_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.offset_x()), f64::from(event.offset_y()))
}

/// Evaluator backed by a host function `(expr, x) => number`.
///
/// A thrown exception is an evaluation failure. A `null` or `undefined`
/// result is also a failure; any other non-number (a complex value, say)
/// has no real value to plot and reads as NaN.
pub struct JsEvaluator {
    function: Function,
}

impl JsEvaluator {
    #[must_use]
    pub fn new(function: Function) -> Self {
        Self { function }
    }
}

impl Evaluator for JsEvaluator {
    fn evaluate(&self, expr: &str, x: f64) -> Result<f64, EvalError> {
        let value = self
            .function
            .call2(&JsValue::NULL, &JsValue::from_str(expr), &JsValue::from_f64(x))
            .map_err(|thrown| EvalError::Host(describe_thrown(&thrown)))?;
        if let Some(y) = value.as_f64() {
            return Ok(y);
        }
        if value.is_undefined() || value.is_null() {
            return Err(EvalError::NotANumber);
        }
        Ok(f64::NAN)
    }
}

fn describe_thrown(thrown: &JsValue) -> String {
    if let Some(err) = thrown.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    thrown.as_string().unwrap_or_else(|| format!("{thrown:?}"))
}

#[wasm_bindgen]
pub struct Plotter {
    engine: Engine,
}

#[wasm_bindgen]
impl Plotter {
    /// `evaluate` replaces the built-in expression language when given.
    /// `config_json` is a partial [`PlotterConfig`] document.
    ///
    /// # Errors
    ///
    /// Throws if the config is invalid or the canvas has no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        evaluate: Option<Function>,
        config_json: Option<String>,
    ) -> Result<Plotter, JsValue> {
        let config = match config_json {
            Some(json) => PlotterConfig::from_json(&json).map_err(to_js)?,
            None => PlotterConfig::default(),
        };
        let evaluator: Box<dyn Evaluator> = match evaluate {
            Some(function) => Box::new(JsEvaluator::new(function)),
            None => Box::new(ExprEvaluator),
        };
        let core = EngineCore::with_config(config, evaluator).map_err(to_js)?;
        let engine = Engine::new(canvas, core).map_err(to_js)?;
        log::info!("plotter attached to canvas");
        Ok(Self { engine })
    }

    /// Resize to CSS pixel dimensions and redraw.
    ///
    /// # Errors
    ///
    /// Throws if the redraw fails.
    pub fn resize(&mut self, width: u32, height: u32, dpr: f64) -> Result<(), JsValue> {
        self.engine.set_viewport(width, height, dpr).map_err(render_failed)
    }

    /// # Errors
    ///
    /// Throws if the cursor cannot be set.
    pub fn pointer_down(&mut self, event: &MouseEvent) -> Result<(), JsValue> {
        self.engine.on_pointer_down(offset_point(event)).map_err(render_failed)
    }

    /// # Errors
    ///
    /// Throws if the redraw fails.
    pub fn pointer_move(&mut self, event: &MouseEvent) -> Result<(), JsValue> {
        self.engine.on_pointer_move(offset_point(event)).map_err(render_failed)
    }

    /// # Errors
    ///
    /// Throws if the cursor cannot be reset.
    pub fn pointer_up(&mut self, event: &MouseEvent) -> Result<(), JsValue> {
        self.engine.on_pointer_up(offset_point(event)).map_err(render_failed)
    }

    /// # Errors
    ///
    /// Throws if the cursor cannot be reset.
    pub fn pointer_leave(&mut self) -> Result<(), JsValue> {
        self.engine.on_pointer_leave().map_err(render_failed)
    }

    /// Zoom around the pointer. Suppresses the page scroll.
    ///
    /// # Errors
    ///
    /// Throws if the redraw fails.
    pub fn wheel(&mut self, event: &WheelEvent) -> Result<(), JsValue> {
        event.prevent_default();
        let delta = WheelDelta { dx: event.delta_x(), dy: event.delta_y() };
        self.engine.on_wheel(offset_point(event), delta).map_err(render_failed)
    }

    /// Returns `false` when the expression is a duplicate or does not evaluate.
    ///
    /// # Errors
    ///
    /// Throws if the redraw fails.
    pub fn add_expression(&mut self, expr: &str) -> Result<bool, JsValue> {
        self.engine.add_expression(expr).map_err(render_failed)
    }

    /// # Errors
    ///
    /// Throws if the redraw fails.
    pub fn remove_last(&mut self) -> Result<(), JsValue> {
        self.engine.remove_last().map_err(render_failed)
    }

    /// # Errors
    ///
    /// Throws if the redraw fails.
    pub fn clear(&mut self) -> Result<(), JsValue> {
        self.engine.clear_expressions().map_err(render_failed)
    }

    /// Plotted expressions in draw order.
    #[must_use]
    pub fn equations(&self) -> Vec<String> {
        self.engine.equations().as_slice().to_vec()
    }

    /// Current viewport bounds as a JSON object.
    ///
    /// # Errors
    ///
    /// Throws if serialization fails.
    pub fn viewport(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.viewport()).map_err(to_js)
    }

    /// # Errors
    ///
    /// Throws if the redraw fails.
    pub fn redraw(&mut self) -> Result<(), JsValue> {
        self.engine.render().map_err(render_failed)
    }
}

/// Module entry point: route panics and `log` output to the browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // A logger is already installed by an earlier instance.
        log::debug!("console logger already initialized");
    }
}
