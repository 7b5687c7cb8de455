//! Coordinate mapping between graph space and surface (pixel) space.
//!
//! Graph space is the mathematical plane: x grows to the right and y grows
//! upward. Surface space is the drawing target: origin at the top-left corner,
//! y grows downward, units are CSS pixels. Every function here is pure; the
//! viewport and surface size are passed in explicitly.

#[cfg(test)]
#[path = "mapper_test.rs"]
mod mapper_test;

use serde::{Deserialize, Serialize};

use crate::viewport::Viewport;

/// A point in either graph or surface space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the drawing surface in CSS pixels. Both dimensions are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// Create a size, clamping zero dimensions up to one pixel.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width: width.max(1), height: height.max(1) }
    }

    #[must_use]
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Map a graph-space point onto the surface.
///
/// The y axis is flipped: graph y increases upward, pixel rows increase downward.
#[must_use]
pub fn to_surface(graph: Point, viewport: &Viewport, size: SurfaceSize) -> Point {
    let w = size.width_f64();
    let h = size.height_f64();
    Point {
        x: (graph.x - viewport.x_min()) / viewport.width() * w,
        y: h - (graph.y - viewport.y_min()) / viewport.height() * h,
    }
}

/// Map a surface point back into graph space. Exact inverse of [`to_surface`].
#[must_use]
pub fn to_graph(pixel: Point, viewport: &Viewport, size: SurfaceSize) -> Point {
    let h = size.height_f64();
    Point {
        x: graph_x_of_pixel_x(pixel.x, viewport, size),
        y: viewport.y_min() + (h - pixel.y) / h * viewport.height(),
    }
}

/// The graph x coordinate under pixel column `pixel_x`.
#[must_use]
pub fn graph_x_of_pixel_x(pixel_x: f64, viewport: &Viewport, size: SurfaceSize) -> f64 {
    viewport.x_min() + pixel_x / size.width_f64() * viewport.width()
}
