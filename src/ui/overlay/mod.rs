//! Terminal host for the overlay.
//!
//! Drives the engine from a timer loop, paints its primitives onto a
//! ratatui canvas and persists the overlay position on close.

mod app;
mod canvas;
mod event_handler;

pub use app::{overlay_rect, run_overlay_app, OverlayApp, OVERLAY_HEIGHT, OVERLAY_WIDTH};
pub use canvas::{rasterize, raster_step, PrimitiveCanvas};
pub use event_handler::{map_key, OverlayEvent};
