//! Input model: wheel deltas and the pan gesture state machine.
//!
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up. The drag anchor is stored in graph space: every pointer-move
//! recomputes the graph point under the cursor against the current (already
//! shifted) viewport and pans by the difference, which keeps the anchor
//! pinned under the cursor for the whole drag.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::mapper::Point;

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (negative = up / forward).
    pub dy: f64,
}

impl WheelDelta {
    #[must_use]
    pub fn vertical(dy: f64) -> Self {
        Self { dx: 0.0, dy }
    }

    /// Whether the wheel moved up / forward, which zooms in.
    #[must_use]
    pub fn is_zoom_in(self) -> bool {
        self.dy < 0.0
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning by dragging.
    Dragging {
        /// Graph-space point under the pointer when the drag started.
        anchor: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}
