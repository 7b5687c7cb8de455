//! Interactive 2D function plotter.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! plotting surface: the graph-space viewport, pan/zoom gestures, the list of
//! plotted expressions, and the per-frame draw of grid, axes and curves. The
//! host JavaScript layer only wires DOM events into [`web::Plotter`].
//!
//! Everything except [`canvas2d`], [`engine::Engine`] and [`web`] is plain Rust
//! and runs natively, so the drawing logic is tested against
//! [`render::RecordingSurface`] instead of a browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`viewport`] | Graph-space bounds with pan and anchored zoom |
//! | [`mapper`] | Graph to surface coordinate conversions |
//! | [`input`] | Wheel deltas and the pan gesture state machine |
//! | [`equations`] | Ordered, de-duplicated expression list |
//! | [`eval`] | The [`eval::Evaluator`] seam and its error type |
//! | [`expr`] | Built-in expression parser and evaluator |
//! | [`render`] | Frame composition, [`render::Surface`] and a recording surface |
//! | [`grid`] | Grid lines and axes |
//! | [`curve`] | Per-column curve sampling and stroking |
//! | [`canvas2d`] | `Surface` over a browser 2D canvas context |
//! | [`config`] | JSON configuration with validated defaults |
//! | [`consts`] | Default bounds, zoom factors and styles |
//! | [`web`] | `wasm-bindgen` exports for the host page |

pub mod canvas2d;
pub mod config;
pub mod consts;
pub mod curve;
pub mod engine;
pub mod equations;
pub mod eval;
pub mod expr;
pub mod grid;
pub mod input;
pub mod mapper;
pub mod render;
pub mod viewport;
pub mod web;
