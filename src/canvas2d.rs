//! [`Surface`] implementation over a browser `CanvasRenderingContext2d`.
//!
//! This is the only module that issues Canvas2D drawing calls. Coordinates
//! arrive in CSS pixels; the device pixel ratio is applied once per frame as
//! the context transform so the backing store stays sharp on high-DPI screens.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::mapper::SurfaceSize;
use crate::render::{RenderError, StrokeStyle, Surface};

/// Convert a thrown JS value into a [`RenderError`].
pub(crate) fn js_error(value: JsValue) -> RenderError {
    RenderError::Canvas(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    dpr: f64,
}

impl Canvas2dSurface {
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d, dpr: f64) -> Self {
        Self { ctx, dpr }
    }

    /// Acquire the canvas's 2D context.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Canvas`] if the context is unavailable.
    pub fn from_canvas(canvas: &HtmlCanvasElement, dpr: f64) -> Result<Self, RenderError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| RenderError::Canvas("2d context unavailable".to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::Canvas("context is not a CanvasRenderingContext2d".to_owned()))?;
        Ok(Self::new(ctx, dpr))
    }

    pub fn set_dpr(&mut self, dpr: f64) {
        self.dpr = dpr;
    }
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self, size: SurfaceSize) -> Result<(), RenderError> {
        self.ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)
            .map_err(js_error)?;
        self.ctx.clear_rect(0.0, 0.0, size.width_f64(), size.height_f64());
        Ok(())
    }

    fn set_stroke(&mut self, style: &StrokeStyle) {
        self.ctx.set_stroke_style_str(&style.color);
        self.ctx.set_line_width(style.width);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}
