use serde::{Deserialize, Serialize};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The square bounding a circle.
    pub fn around_circle(center: Point, radius: f64) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `point` lies inside the ellipse inscribed in this rectangle.
    pub fn ellipse_contains(&self, point: Point) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        let center = self.center();
        let dx = (point.x - center.x) / (self.width / 2.0);
        let dy = (point.y - center.y) / (self.height / 2.0);
        dx * dx + dy * dy <= 1.0
    }
}

/// Region drawing is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClipRegion {
    /// No clipping.
    None,
    /// The ellipse inscribed in a rectangle.
    Ellipse(Rect),
}

impl ClipRegion {
    pub fn contains(&self, point: Point) -> bool {
        match self {
            ClipRegion::None => true,
            ClipRegion::Ellipse(rect) => rect.ellipse_contains(point),
        }
    }
}

/// One draw call for the host surface.
///
/// Arc angles follow the usual toolkit convention: degrees, 0° at three
/// o'clock, positive spans counter-clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    FillEllipse {
        rect: Rect,
        color: Rgb,
    },
    StrokeArc {
        rect: Rect,
        start_deg: f64,
        span_deg: f64,
        color: Rgb,
        width: f64,
    },
    DrawLine {
        from: Point,
        to: Point,
        color: Rgb,
        width: f64,
    },
    /// A closed polygon, filled.
    FillPath {
        points: Vec<Point>,
        color: Rgb,
    },
    /// Replaces the current clip region for subsequent primitives.
    SetClip(ClipRegion),
    /// Text centered horizontally on `anchor.x`, with its baseline row at `anchor.y`.
    DrawText {
        anchor: Point,
        text: String,
        color: Rgb,
    },
}

/// Even-odd point-in-polygon test.
pub(crate) fn polygon_contains(points: &[Point], point: Point) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);

    for (i, a) in points.iter().enumerate() {
        let b = points[j];
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}
