//! Mutable 2D point/vector.
//!
//! Mutating methods work in place and return `&mut Self` so calls chain:
//! `v.translate(1.0, 0.0).rotate(PI).precision(4)`.
//!
//! The by-value operators (`+`, `-`, unary `-`, `* f64`) return new values and are
//! implemented without importing the `std::ops` traits, so `v.add(w)` always
//! resolves to the in-place method.

use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::util::round_dp;

/// A 2D coordinate. Equality (`==`) is exact; see [`Vect::equals_almost`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vect {
    pub x: f64,
    pub y: f64,
}

impl Vect {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn add(&mut self, v: Vect) -> &mut Self {
        self.x += v.x;
        self.y += v.y;
        self
    }

    #[inline]
    pub fn sub(&mut self, v: Vect) -> &mut Self {
        self.x -= v.x;
        self.y -= v.y;
        self
    }

    #[inline]
    pub fn scale(&mut self, s: f64) -> &mut Self {
        self.scale_xy(s, s)
    }

    #[inline]
    pub fn scale_xy(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.x *= sx;
        self.y *= sy;
        self
    }

    #[inline]
    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.x += dx;
        self.y += dy;
        self
    }

    #[inline]
    pub fn dot(&self, other: Vect) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Scale to unit length. See [`Vect::normalize_to`].
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        self.normalize_to(1.0)
    }

    /// Scale to `new_length`.
    ///
    /// A zero vector has no direction: it is left unchanged and a warning is logged.
    /// Callers must not assume the length changed.
    pub fn normalize_to(&mut self, new_length: f64) -> &mut Self {
        let len = self.length();
        if len == 0.0 {
            warn!(x = self.x, y = self.y, "cannot normalize a zero-length vector");
            return self;
        }
        self.scale(new_length / len)
    }

    /// `atan2(y, x)` in radians.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// [`Vect::angle`] in degrees, rounded to 2 decimal places.
    #[inline]
    pub fn degrees(&self) -> f64 {
        round_dp(self.angle().to_degrees(), 2)
    }

    /// Bearing from `self` to `p`, `atan2(dy, dx)`.
    #[inline]
    pub fn angle_to(&self, p: Vect) -> f64 {
        (p.y - self.y).atan2(p.x - self.x)
    }

    /// Both coordinate deltas within `epsilon` (use `f64::EPSILON` for the tight default).
    #[inline]
    pub fn equals_almost(&self, p: Vect, epsilon: f64) -> bool {
        (self.x - p.x).abs() <= epsilon && (self.y - p.y).abs() <= epsilon
    }

    /// Rotate about the origin.
    pub fn rotate(&mut self, radians: f64) -> &mut Self {
        let (sin, cos) = radians.sin_cos();
        let (x, y) = (self.x, self.y);
        self.x = cos * x - sin * y;
        self.y = sin * x + cos * y;
        self
    }

    /// Snap both coordinates to `dp` decimal places.
    #[inline]
    pub fn precision(&mut self, dp: u32) -> &mut Self {
        self.x = round_dp(self.x, dp);
        self.y = round_dp(self.y, dp);
        self
    }

    #[inline]
    pub fn round(&mut self) -> &mut Self {
        self.x = self.x.round();
        self.y = self.y.round();
        self
    }

    /// 2D cross product `self × other`.
    #[inline]
    pub fn cross(&self, other: Vect) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn distance_to(&self, p: Vect) -> f64 {
        Self::distance_between(*self, p)
    }

    /// Centroid of `points`; the zero vector for empty input.
    pub fn average(points: &[Vect]) -> Vect {
        if points.is_empty() {
            return Vect::zero();
        }
        let n = points.len() as f64;
        let sum = points.iter().fold(Vect::zero(), |acc, p| acc + *p);
        Vect::new(sum.x / n, sum.y / n)
    }

    #[inline]
    pub fn distance_between(p: Vect, q: Vect) -> f64 {
        (p.x - q.x).hypot(p.y - q.y)
    }

    /// Point with minimal `y`, ties broken by minimal `x`.
    pub fn top_left(points: &[Vect]) -> Option<Vect> {
        points.iter().copied().reduce(|best, p| {
            if p.y < best.y || (p.y == best.y && p.x < best.x) {
                p
            } else {
                best
            }
        })
    }

    /// Pair consecutive numbers into points; a trailing odd value is ignored.
    pub fn from_coords(coords: &[f64]) -> Vec<Vect> {
        coords
            .chunks_exact(2)
            .map(|xy| Vect::new(xy[0], xy[1]))
            .collect()
    }
}

impl fmt::Display for Vect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl From<[f64; 2]> for Vect {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Vect> for [f64; 2] {
    #[inline]
    fn from(v: Vect) -> Self {
        [v.x, v.y]
    }
}

impl From<(f64, f64)> for Vect {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Vector2<f64>> for Vect {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vect> for Vector2<f64> {
    #[inline]
    fn from(v: Vect) -> Self {
        Vector2::new(v.x, v.y)
    }
}

impl std::ops::Add for Vect {
    type Output = Vect;
    #[inline]
    fn add(self, rhs: Vect) -> Self::Output {
        Vect::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl std::ops::Sub for Vect {
    type Output = Vect;
    #[inline]
    fn sub(self, rhs: Vect) -> Self::Output {
        Vect::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl std::ops::Neg for Vect {
    type Output = Vect;
    #[inline]
    fn neg(self) -> Self::Output {
        Vect::new(-self.x, -self.y)
    }
}
impl std::ops::Mul<f64> for Vect {
    type Output = Vect;
    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Vect::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn length_and_normalize() {
        let v = Vect::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.length_squared(), 25.0);
        let mut u = v;
        u.normalize();
        assert!((u.length() - 1.0).abs() < 1e-12);
        assert!(u.equals_almost(Vect::new(0.6, 0.8), 1e-12));
        // the original is untouched
        assert_eq!(v, Vect::new(3.0, 4.0));
        u.normalize_to(10.0);
        assert!(u.equals_almost(Vect::new(6.0, 8.0), 1e-12));
    }

    #[test]
    fn normalize_zero_is_noop() {
        let mut z = Vect::zero();
        z.normalize();
        assert_eq!(z, Vect::zero());
    }

    #[test]
    fn chained_mutation_returns_same_instance() {
        let mut v = Vect::new(1.0, 2.0);
        v.add(Vect::new(1.0, 1.0))
            .scale(2.0)
            .translate(-1.0, 0.0)
            .sub(Vect::new(0.0, 1.0));
        assert_eq!(v, Vect::new(3.0, 5.0));
        v.scale_xy(2.0, -1.0);
        assert_eq!(v, Vect::new(6.0, -5.0));
    }

    #[test]
    fn angles() {
        let v = Vect::new(0.0, 2.0);
        assert!((v.angle() - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(v.degrees(), 90.0);
        assert_eq!(Vect::new(1.0, 1.0).degrees(), 45.0);
        assert_eq!(Vect::new(-1.0, -0.0001).degrees(), -179.99);
        let from = Vect::new(1.0, 1.0);
        assert!((from.angle_to(Vect::new(1.0, 3.0)) - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn equals_almost_respects_epsilon() {
        let p = Vect::new(1.0, 1.0);
        assert!(p.equals_almost(p, f64::EPSILON));
        assert!(p.equals_almost(Vect::new(1.05, 0.95), 0.1));
        assert!(!p.equals_almost(Vect::new(1.2, 1.0), 0.1));
        assert!(!p.equals_almost(Vect::new(1.0, 1.0 + 1e-9), f64::EPSILON));
    }

    #[test]
    fn rotate_and_round() {
        let mut v = Vect::new(1.0, 0.0);
        v.rotate(PI);
        assert!(v.equals_almost(Vect::new(-1.0, 0.0), 1e-12));
        let mut w = Vect::new(1.23456, -7.891);
        w.precision(2);
        assert_eq!(w, Vect::new(1.23, -7.89));
        w.round();
        assert_eq!(w, Vect::new(1.0, -8.0));
    }

    #[test]
    fn statics() {
        assert_eq!(Vect::average(&[]), Vect::zero());
        let pts = [Vect::new(0.0, 0.0), Vect::new(2.0, 0.0), Vect::new(1.0, 3.0)];
        assert_eq!(Vect::average(&pts), Vect::new(1.0, 1.0));
        assert_eq!(
            Vect::distance_between(Vect::new(0.0, 0.0), Vect::new(3.0, 4.0)),
            5.0
        );
        let tl = Vect::top_left(&[Vect::new(2.0, 1.0), Vect::new(5.0, 0.0), Vect::new(1.0, 0.0)]);
        assert_eq!(tl, Some(Vect::new(1.0, 0.0)));
        assert_eq!(Vect::top_left(&[]), None);
        assert_eq!(
            Vect::from_coords(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            vec![Vect::new(1.0, 2.0), Vect::new(3.0, 4.0)]
        );
    }

    #[test]
    fn nalgebra_round_trip() {
        let v = Vect::new(-1.5, 2.5);
        let n: Vector2<f64> = v.into();
        assert_eq!(n, Vector2::new(-1.5, 2.5));
        assert_eq!(Vect::from(n), v);
        assert_eq!(v.to_string(), "-1.5,2.5");
    }
}
