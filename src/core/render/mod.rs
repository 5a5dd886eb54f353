//! Geometry for the overlay.
//!
//! Renderers are pure: they take the current expression/animation state and
//! return a list of [`Primitive`]s in a local coordinate space (y grows
//! downwards). The host submits that list to its drawing surface.

mod face;
mod gauge;
mod primitives;
mod scene;

pub use face::{FaceRenderer, FACE_UNITS};
pub use gauge::{fill_boundary, fill_level, gauge_color, LiquidWaveRenderer, WAVE_AMPLITUDE, WAVELENGTH};
pub use primitives::{ClipRegion, Point, Primitive, Rect, Rgb};
pub(crate) use primitives::polygon_contains;
pub use scene::{format_rate, Scene, ViewMode, SCENE_HEIGHT, SCENE_WIDTH};
