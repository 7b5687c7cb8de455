//! The visible rectangle of graph space and its pan/zoom mutations.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::Serialize;

use crate::consts::{DEFAULT_X_MAX, DEFAULT_X_MIN, DEFAULT_Y_MAX, DEFAULT_Y_MIN};
use crate::mapper::Point;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewportError {
    #[error("degenerate viewport: x [{x_min}, {x_max}], y [{y_min}, {y_max}]")]
    Degenerate { x_min: f64, x_max: f64, y_min: f64, y_max: f64 },
}

/// Visible graph-space bounds.
///
/// Always satisfies `x_min < x_max` and `y_min < y_max` with finite values.
/// [`Viewport::new`] checks this; [`Viewport::pan`] and [`Viewport::zoom`]
/// refuse inputs that could break it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { x_min: DEFAULT_X_MIN, x_max: DEFAULT_X_MAX, y_min: DEFAULT_Y_MIN, y_max: DEFAULT_Y_MAX }
    }
}

impl Viewport {
    /// Build a viewport from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::Degenerate`] if a bound is not finite or an
    /// axis is empty or inverted.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, ViewportError> {
        let vp = Self { x_min, x_max, y_min, y_max };
        if vp.is_valid() {
            Ok(vp)
        } else {
            Err(ViewportError::Degenerate { x_min, x_max, y_min, y_max })
        }
    }

    #[must_use]
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    #[must_use]
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Horizontal extent, `x_max - x_min`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent, `y_max - y_min`.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Graph-space center of the visible rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.x_min + self.x_max) * 0.5, (self.y_min + self.y_max) * 0.5)
    }

    /// Translate all four bounds by a graph-space delta.
    ///
    /// Non-finite deltas are ignored.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            log::debug!("ignoring non-finite pan ({dx}, {dy})");
            return;
        }
        let next = Self { x_min: self.x_min + dx, x_max: self.x_max + dx, y_min: self.y_min + dy, y_max: self.y_max + dy };
        self.commit(next);
    }

    /// Rescale the bounds around `anchor` so that the anchor stays put.
    ///
    /// `scale < 1` zooms in, `scale > 1` zooms out. Non-positive and non-finite
    /// scales are ignored.
    pub fn zoom(&mut self, anchor: Point, scale: f64) {
        if !(scale.is_finite() && scale > 0.0) || !anchor.x.is_finite() || !anchor.y.is_finite() {
            log::debug!("ignoring zoom by {scale} around ({}, {})", anchor.x, anchor.y);
            return;
        }
        let next = Self {
            x_min: anchor.x + (self.x_min - anchor.x) * scale,
            x_max: anchor.x + (self.x_max - anchor.x) * scale,
            y_min: anchor.y + (self.y_min - anchor.y) * scale,
            y_max: anchor.y + (self.y_max - anchor.y) * scale,
        };
        self.commit(next);
    }

    fn is_valid(&self) -> bool {
        let finite = self.x_min.is_finite() && self.x_max.is_finite() && self.y_min.is_finite() && self.y_max.is_finite();
        finite && self.x_min < self.x_max && self.y_min < self.y_max
    }

    /// Adopt `next` unless floating-point collapse made it degenerate.
    fn commit(&mut self, next: Self) {
        if next.is_valid() {
            *self = next;
        } else {
            log::debug!("rejecting degenerate viewport {next:?}");
        }
    }
}
