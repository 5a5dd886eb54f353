//! Emoji face geometry.
//!
//! Feature positions are laid out on a 100×100 grid and mapped into the
//! scaled face rectangle.

use super::primitives::{Point, Primitive, Rect, Rgb};
use crate::core::expression::{Expression, EyeStyle, MouthStyle};

/// Size of the design grid features are laid out on.
pub const FACE_UNITS: f64 = 100.0;

const FEATURE: Rgb = Rgb::BLACK;
const PUPIL: Rgb = Rgb::WHITE;
const STROKE: f64 = 2.0;

/// Eye rectangles on the design grid, left then right.
const ROUND_EYES: [(f64, f64, f64, f64); 2] = [(25.0, 30.0, 10.0, 10.0), (65.0, 30.0, 10.0, 10.0)];
const NARROW_EYES: [(f64, f64, f64, f64); 2] = [(25.0, 35.0, 10.0, 5.0), (65.0, 35.0, 10.0, 5.0)];
const WIDE_EYES: [(f64, f64, f64, f64); 2] = [(20.0, 30.0, 15.0, 15.0), (65.0, 30.0, 15.0, 15.0)];
const PUPILS: [(f64, f64, f64, f64); 2] = [(25.0, 35.0, 5.0, 5.0), (70.0, 35.0, 5.0, 5.0)];
const BROWS: [(f64, f64, f64, f64); 2] = [(20.0, 30.0, 20.0, 20.0), (60.0, 30.0, 20.0, 20.0)];

/// Computes face geometry inside a bounding box.
#[derive(Debug, Clone)]
pub struct FaceRenderer {
    pub bounds: Rect,
}

impl FaceRenderer {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// The face rectangle after breathing, recentered in the bounds.
    pub fn scaled_bounds(&self, scale_factor: f64) -> Rect {
        let width = self.bounds.width * scale_factor;
        let height = self.bounds.height * scale_factor;

        Rect::new(
            self.bounds.x + (self.bounds.width - width) / 2.0,
            self.bounds.y + (self.bounds.height - height) / 2.0,
            width,
            height,
        )
    }

    /// Primitives for one face frame.
    ///
    /// The mouth depends only on `expression`; when `blinking` both eyes are
    /// closed lines whatever the expression.
    pub fn render(&self, expression: Expression, blinking: bool, scale_factor: f64) -> Vec<Primitive> {
        let face = self.scaled_bounds(scale_factor);
        let grid = Grid { face };

        let mut primitives = vec![Primitive::FillEllipse {
            rect: face,
            color: expression.face_color(),
        }];

        if blinking {
            primitives.extend(closed_eyes(&grid, expression.eye_style()));
        } else {
            primitives.extend(open_eyes(&grid, expression.eye_style()));
        }

        if expression.has_brows() {
            primitives.extend(
                BROWS
                    .iter()
                    .map(|&brow| arc(grid.rect(brow), 200.0, 140.0)),
            );
        }

        primitives.push(mouth(&grid, expression.mouth_style()));
        primitives
    }
}

/// Maps design-grid coordinates into the face rectangle.
struct Grid {
    face: Rect,
}

impl Grid {
    fn x(&self, units: f64) -> f64 {
        self.face.x + units * self.face.width / FACE_UNITS
    }

    fn y(&self, units: f64) -> f64 {
        self.face.y + units * self.face.height / FACE_UNITS
    }

    fn point(&self, x: f64, y: f64) -> Point {
        Point::new(self.x(x), self.y(y))
    }

    fn rect(&self, (x, y, width, height): (f64, f64, f64, f64)) -> Rect {
        Rect::new(
            self.x(x),
            self.y(y),
            width * self.face.width / FACE_UNITS,
            height * self.face.height / FACE_UNITS,
        )
    }
}

fn eye_rects(style: EyeStyle) -> [(f64, f64, f64, f64); 2] {
    match style {
        EyeStyle::Round => ROUND_EYES,
        EyeStyle::Narrow => NARROW_EYES,
        EyeStyle::Wide => WIDE_EYES,
    }
}

fn open_eyes(grid: &Grid, style: EyeStyle) -> Vec<Primitive> {
    let mut primitives: Vec<_> = eye_rects(style)
        .iter()
        .map(|&eye| Primitive::FillEllipse {
            rect: grid.rect(eye),
            color: FEATURE,
        })
        .collect();

    if style == EyeStyle::Wide {
        primitives.extend(PUPILS.iter().map(|&pupil| Primitive::FillEllipse {
            rect: grid.rect(pupil),
            color: PUPIL,
        }));
    }

    primitives
}

fn closed_eyes(grid: &Grid, style: EyeStyle) -> Vec<Primitive> {
    eye_rects(style)
        .iter()
        .map(|&eye| {
            let rect = grid.rect(eye);
            let middle = rect.y + rect.height / 2.0;
            Primitive::DrawLine {
                from: Point::new(rect.x, middle),
                to: Point::new(rect.right(), middle),
                color: FEATURE,
                width: STROKE,
            }
        })
        .collect()
}

fn mouth(grid: &Grid, style: MouthStyle) -> Primitive {
    match style {
        MouthStyle::Smile => arc(grid.rect((25.0, 50.0, 50.0, 20.0)), 0.0, -180.0),
        MouthStyle::Flat => Primitive::DrawLine {
            from: grid.point(30.0, 60.0),
            to: grid.point(70.0, 60.0),
            color: FEATURE,
            width: STROKE,
        },
        MouthStyle::Frown => arc(grid.rect((25.0, 60.0, 50.0, 20.0)), 180.0, -180.0),
        MouthStyle::DeepFrown => arc(grid.rect((25.0, 65.0, 50.0, 20.0)), 180.0, -180.0),
    }
}

fn arc(rect: Rect, start_deg: f64, span_deg: f64) -> Primitive {
    Primitive::StrokeArc {
        rect,
        start_deg,
        span_deg,
        color: FEATURE,
        width: STROKE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> FaceRenderer {
        FaceRenderer::new(Rect::new(50.0, 50.0, 100.0, 100.0))
    }

    fn mouths(primitives: &[Primitive]) -> Vec<&Primitive> {
        // The mouth is always the last primitive.
        primitives.last().into_iter().collect()
    }

    #[test]
    fn test_unit_scale_keeps_bounds() {
        assert_eq!(renderer().scaled_bounds(1.0), Rect::new(50.0, 50.0, 100.0, 100.0));
    }

    #[test]
    fn test_scaling_is_symmetric() {
        let face = renderer().scaled_bounds(1.02);
        assert!((face.x - 49.0).abs() < 1e-9);
        assert!((face.y - 49.0).abs() < 1e-9);
        assert!((face.width - 102.0).abs() < 1e-9);

        let shrunk = renderer().scaled_bounds(0.98);
        assert!((shrunk.center().x - 100.0).abs() < 1e-9);
        assert!((shrunk.center().y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_face_color_follows_expression() {
        let primitives = renderer().render(Expression::CpuStruggling, false, 1.0);
        assert!(matches!(
            primitives.first(),
            Some(Primitive::FillEllipse {
                color: Rgb(255, 0, 0),
                ..
            })
        ));
    }

    #[test]
    fn test_happy_face_layout() {
        let primitives = renderer().render(Expression::Happy, false, 1.0);

        assert_eq!(
            primitives[1],
            Primitive::FillEllipse {
                rect: Rect::new(75.0, 80.0, 10.0, 10.0),
                color: FEATURE,
            }
        );
        assert!(matches!(
            primitives.last(),
            Some(Primitive::StrokeArc {
                start_deg,
                span_deg,
                ..
            }) if *start_deg == 0.0 && *span_deg == -180.0
        ));
    }

    #[test]
    fn test_blinking_closes_eyes_for_every_expression() {
        for expression in [
            Expression::Happy,
            Expression::Neutral,
            Expression::Worried,
            Expression::Struggling,
            Expression::CpuWorried,
            Expression::CpuStruggling,
            Expression::RamTired,
            Expression::RamExhausted,
        ] {
            let primitives = renderer().render(expression, true, 1.0);
            let eye_fills = primitives
                .iter()
                .skip(1)
                .filter(|p| matches!(p, Primitive::FillEllipse { .. }))
                .count();
            let lines = primitives
                .iter()
                .filter(|p| matches!(p, Primitive::DrawLine { from, to, .. } if from.y == to.y))
                .count();

            assert_eq!(eye_fills, 0, "{expression:?}");
            assert!(lines >= 2, "{expression:?}");
        }
    }

    #[test]
    fn test_mouth_ignores_blink() {
        for expression in [Expression::Happy, Expression::Neutral, Expression::RamExhausted] {
            let open = renderer().render(expression, false, 1.0);
            let closed = renderer().render(expression, true, 1.0);
            assert_eq!(mouths(&open), mouths(&closed));
        }
    }

    #[test]
    fn test_struggling_eyes_have_pupils() {
        let primitives = renderer().render(Expression::CpuStruggling, false, 1.0);
        let pupils = primitives
            .iter()
            .filter(|p| matches!(p, Primitive::FillEllipse { color, .. } if *color == PUPIL))
            .count();
        assert_eq!(pupils, 2);

        let happy = renderer().render(Expression::Happy, false, 1.0);
        assert!(!happy
            .iter()
            .any(|p| matches!(p, Primitive::FillEllipse { color, .. } if *color == PUPIL)));
    }

    #[test]
    fn test_worried_has_brows() {
        let primitives = renderer().render(Expression::CpuWorried, false, 1.0);
        let arcs = primitives
            .iter()
            .filter(|p| matches!(p, Primitive::StrokeArc { .. }))
            .count();
        // two brows and a frown
        assert_eq!(arcs, 3);
    }

    #[test]
    fn test_features_scale_with_face() {
        let primitives = renderer().render(Expression::Happy, false, 1.02);
        let Primitive::FillEllipse { rect, .. } = &primitives[1] else {
            panic!("expected left eye");
        };
        assert!((rect.width - 10.2).abs() < 1e-9);
    }
}
