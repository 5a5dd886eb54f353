//! Circular liquid-fill gauge.

use super::primitives::{ClipRegion, Point, Primitive, Rect, Rgb};
use crate::core::expression::LoadBand;
use crate::core::metrics::clamp_percent;

/// Wave height, in local units.
pub const WAVE_AMPLITUDE: f64 = 5.0;
/// Horizontal distance per radian of wave.
pub const WAVELENGTH: f64 = 30.0;

const BACKGROUND: Rgb = Rgb(40, 40, 48);
const OUTLINE: Rgb = Rgb(200, 200, 200);
const LABEL: Rgb = Rgb(255, 255, 255);
const CAPTION: Rgb = Rgb(170, 170, 170);
const CAPTION_GAP: f64 = 12.0;

/// Fill height measured up from the bottom of the circle.
pub fn fill_level(usage_percent: f64, radius: f64) -> f64 {
    clamp_percent(usage_percent as f32) as f64 / 100.0 * 2.0 * radius
}

/// Liquid color by severity.
pub fn gauge_color(usage_percent: f64) -> Rgb {
    match LoadBand::of(usage_percent as f32) {
        LoadBand::Low => Rgb(0, 200, 220),
        LoadBand::Moderate => Rgb(255, 230, 90),
        LoadBand::High => Rgb(255, 110, 90),
        LoadBand::Critical => Rgb(230, 20, 20),
    }
}

/// Wave surface points across the circle's width, left to right.
///
/// Points may overshoot the circle; clipping keeps the fill inside.
pub fn fill_boundary(usage_percent: f64, wave_phase: f64, center: Point, radius: f64) -> Vec<Point> {
    let left = center.x - radius;
    let bottom = center.y + radius;
    let level = fill_level(usage_percent, radius);
    let samples = (radius * 2.0).ceil().max(1.0) as usize;

    (0..=samples)
        .map(|i| {
            let i = i as f64;
            let wave_height = WAVE_AMPLITUDE * (i / WAVELENGTH + wave_phase).sin();
            Point::new(left + i, bottom - level + wave_height)
        })
        .collect()
}

/// Renders a percentage as liquid inside a circle.
#[derive(Debug, Clone)]
pub struct LiquidWaveRenderer {
    pub center: Point,
    pub radius: f64,
}

impl LiquidWaveRenderer {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.center, self.radius)
    }

    /// Primitives for one gauge frame.
    ///
    /// The fill path runs bottom-left, along the wave surface, to
    /// bottom-right and is drawn under a circular clip. The label and caption
    /// are drawn after the clip is cleared.
    pub fn render(&self, usage_percent: f64, wave_phase: f64, fill_color: Rgb, caption: &str) -> Vec<Primitive> {
        let bounds = self.bounds();
        let bottom = bounds.bottom();

        let mut path = Vec::with_capacity((self.radius * 2.0) as usize + 4);
        path.push(Point::new(bounds.x, bottom));
        path.extend(fill_boundary(usage_percent, wave_phase, self.center, self.radius));
        path.push(Point::new(bounds.right(), bottom));

        vec![
            Primitive::FillEllipse {
                rect: bounds,
                color: BACKGROUND,
            },
            Primitive::SetClip(ClipRegion::Ellipse(bounds)),
            Primitive::FillPath {
                points: path,
                color: fill_color,
            },
            Primitive::SetClip(ClipRegion::None),
            Primitive::StrokeArc {
                rect: bounds,
                start_deg: 0.0,
                span_deg: 360.0,
                color: OUTLINE,
                width: 2.0,
            },
            Primitive::DrawText {
                anchor: self.center,
                text: format!("{}%", clamp_percent(usage_percent as f32).round()),
                color: LABEL,
            },
            Primitive::DrawText {
                anchor: Point::new(self.center.x, bottom + CAPTION_GAP),
                text: caption.to_string(),
                color: CAPTION,
            },
        ]
    }
}
