//! Rasterizes engine primitives onto a ratatui canvas.

use std::f64::consts::PI;

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::canvas::{Canvas, Painter, Shape},
};

use crate::core::render::{ClipRegion, Point, Primitive, Rgb, SCENE_HEIGHT, SCENE_WIDTH};

/// Finest step ever used when sampling shapes.
const MIN_STEP: f64 = 0.25;

/// Scene units per canvas pixel for a half-block canvas of `area`.
pub fn raster_step(area: Rect) -> f64 {
    let width = area.width.max(1) as f64;
    let height = area.height.max(1) as f64 * 2.0;
    (SCENE_WIDTH / width).min(SCENE_HEIGHT / height).max(MIN_STEP)
}

/// Scene-space points covered by `primitive` under `clip`.
///
/// `SetClip` and `DrawText` cover no points.
pub fn rasterize(primitive: &Primitive, clip: &ClipRegion, step: f64) -> Vec<Point> {
    let step = step.max(MIN_STEP);

    let points = match primitive {
        Primitive::FillEllipse { rect, .. } => {
            fill_grid(rect.x, rect.y, rect.right(), rect.bottom(), step, |p| {
                rect.ellipse_contains(p)
            })
        }
        Primitive::FillPath { points, .. } => {
            let Some(bounds) = bounding_box(points) else {
                return Vec::new();
            };
            fill_grid(bounds.0, bounds.1, bounds.2, bounds.3, step, |p| {
                crate::core::render::polygon_contains(points, p)
            })
        }
        Primitive::StrokeArc {
            rect,
            start_deg,
            span_deg,
            ..
        } => {
            let center = rect.center();
            let (rx, ry) = (rect.width / 2.0, rect.height / 2.0);
            let length = span_deg.abs().to_radians() * rx.max(ry);
            let samples = (length / step).ceil().max(1.0) as usize;

            (0..=samples)
                .map(|i| {
                    let angle = (start_deg + span_deg * i as f64 / samples as f64) * PI / 180.0;
                    // Counter-clockwise on screen, where y grows downwards.
                    Point::new(center.x + rx * angle.cos(), center.y - ry * angle.sin())
                })
                .collect()
        }
        Primitive::DrawLine { from, to, .. } => {
            let length = ((to.x - from.x).powi(2) + (to.y - from.y).powi(2)).sqrt();
            let samples = (length / step).ceil().max(1.0) as usize;

            (0..=samples)
                .map(|i| {
                    let t = i as f64 / samples as f64;
                    Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
                })
                .collect()
        }
        Primitive::SetClip(_) | Primitive::DrawText { .. } => Vec::new(),
    };

    points.into_iter().filter(|p| clip.contains(*p)).collect()
}

fn fill_grid(left: f64, top: f64, right: f64, bottom: f64, step: f64, inside: impl Fn(Point) -> bool) -> Vec<Point> {
    let mut points = Vec::new();
    let mut y = top + step / 2.0;
    while y < bottom {
        let mut x = left + step / 2.0;
        while x < right {
            let point = Point::new(x, y);
            if inside(point) {
                points.push(point);
            }
            x += step;
        }
        y += step;
    }
    points
}

fn bounding_box(points: &[Point]) -> Option<(f64, f64, f64, f64)> {
    let first = points.first()?;
    Some(points.iter().fold(
        (first.x, first.y, first.x, first.y),
        |(left, top, right, bottom), p| (left.min(p.x), top.min(p.y), right.max(p.x), bottom.max(p.y)),
    ))
}

fn color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Already-rasterized points in one color.
struct Dots<'a> {
    points: &'a [Point],
    color: Color,
}

impl Shape for Dots<'_> {
    fn draw(&self, painter: &mut Painter) {
        for point in self.points {
            // Canvas y grows upwards.
            if let Some((x, y)) = painter.get_point(point.x, SCENE_HEIGHT - point.y) {
                painter.paint(x, y, self.color);
            }
        }
    }
}

/// Paints a primitive list into a terminal area.
pub struct PrimitiveCanvas<'a> {
    primitives: &'a [Primitive],
}

impl<'a> PrimitiveCanvas<'a> {
    pub fn new(primitives: &'a [Primitive]) -> Self {
        Self { primitives }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let step = raster_step(area);
        let units_per_column = SCENE_WIDTH / area.width.max(1) as f64;

        // Rasterize up front; the clip region is stateful across primitives.
        let mut clip = ClipRegion::None;
        let mut layers = Vec::with_capacity(self.primitives.len());
        let mut labels = Vec::new();
        for primitive in self.primitives {
            match primitive {
                Primitive::SetClip(region) => clip = *region,
                Primitive::DrawText {
                    anchor,
                    text,
                    color: text_color,
                } => {
                    let half_width = text.chars().count() as f64 * units_per_column / 2.0;
                    labels.push((
                        anchor.x - half_width,
                        SCENE_HEIGHT - anchor.y,
                        Line::styled(text.clone(), Style::default().fg(color(*text_color))),
                    ));
                }
                Primitive::FillEllipse { color: c, .. }
                | Primitive::StrokeArc { color: c, .. }
                | Primitive::DrawLine { color: c, .. }
                | Primitive::FillPath { color: c, .. } => {
                    layers.push((rasterize(primitive, &clip, step), color(*c)));
                }
            }
        }

        let canvas = Canvas::default()
            .marker(Marker::HalfBlock)
            .x_bounds([0.0, SCENE_WIDTH])
            .y_bounds([0.0, SCENE_HEIGHT])
            .paint(move |ctx| {
                for (points, color) in &layers {
                    ctx.draw(&Dots {
                        points,
                        color: *color,
                    });
                }
                for (x, y, line) in &labels {
                    ctx.print(*x, *y, line.clone());
                }
            });

        frame.render_widget(canvas, area);
    }
}
