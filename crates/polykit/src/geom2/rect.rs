use serde::{Deserialize, Serialize};

use super::vect::Vect;

/// Axis-aligned rectangle with corner `(x, y)`; `width`/`height` are non-negative when built
/// from points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounding box of `points`; the zero rectangle for empty input.
    pub fn from_points(points: &[Vect]) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Closed containment: boundary points are inside.
    #[inline]
    pub fn contains(&self, p: Vect) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vect {
        Vect::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Corners starting at `(x, y)`, then `+x`, then the far corner, then `+y`.
    pub fn points(&self) -> [Vect; 4] {
        [
            Vect::new(self.x, self.y),
            Vect::new(self.x + self.width, self.y),
            Vect::new(self.x + self.width, self.y + self.height),
            Vect::new(self.x, self.y + self.height),
        ]
    }
}
