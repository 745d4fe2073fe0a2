//! 2×3 affine matrix `(x, y) ↦ (a·x + c·y + e, b·x + d·y + f)`.
//!
//! Composition goes through the homogeneous 3×3 form (`nalgebra::Matrix3`,
//! column-vector convention), so `post_multiply` and `pre_multiply` only differ
//! in which side the input lands on.
//!
//! Code cross-refs: `Vect`, `Poly::apply_matrix`, `types::GeomCfg`

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix2, Matrix3, Vector2};
use serde::{Deserialize, Serialize};

use super::types::GeomCfg;
use super::util::round_dp;
use super::vect::Vect;

/// Errors surfaced by matrix construction and inversion.
#[derive(Debug, Clone, PartialEq)]
pub enum MatError {
    /// Non-identity matrix with `|det|` below `GeomCfg::eps_det`.
    NotInvertible { determinant: f64 },
    /// String is not of the form `matrix(a, b, c, d, e, f)`.
    Parse { input: String },
}

impl fmt::Display for MatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatError::NotInvertible { determinant } => {
                write!(f, "matrix is not invertible (determinant {determinant:e})")
            }
            MatError::Parse { input } => {
                write!(f, "expected \"matrix(a, b, c, d, e, f)\", got {input:?}")
            }
        }
    }
}

impl std::error::Error for MatError {}

/// Affine transform with linear part `[a c; b d]` and translation `(e, f)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mat {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Mat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat {
    pub const IDENTITY: Mat = Mat {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Homogeneous form `[a c e; b d f; 0 0 1]`.
    #[inline]
    pub fn to_homogeneous(&self) -> Matrix3<f64> {
        Matrix3::new(self.a, self.c, self.e, self.b, self.d, self.f, 0.0, 0.0, 1.0)
    }

    /// Inverse of [`Mat::to_homogeneous`]; the bottom row is ignored.
    #[inline]
    pub fn from_homogeneous(m: &Matrix3<f64>) -> Self {
        Self::new(m[(0, 0)], m[(1, 0)], m[(0, 1)], m[(1, 1)], m[(0, 2)], m[(1, 2)])
    }

    /// Linear part `[a c; b d]`.
    #[inline]
    pub fn linear(&self) -> Matrix2<f64> {
        Matrix2::new(self.a, self.c, self.b, self.d)
    }

    #[inline]
    pub fn translation(&self) -> Vector2<f64> {
        Vector2::new(self.e, self.f)
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Exact comparison against the identity coefficients.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// `|det| >= GeomCfg::default().eps_det`.
    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.is_invertible_with(&GeomCfg::default())
    }

    #[inline]
    pub fn is_invertible_with(&self, cfg: &GeomCfg) -> bool {
        self.determinant().abs() >= cfg.eps_det
    }

    /// Closed-form affine inverse. The identity is returned as-is without a determinant check.
    pub fn inverse(&self) -> Result<Mat, MatError> {
        self.inverse_with(&GeomCfg::default())
    }

    /// [`Mat::inverse`] with the singularity threshold taken from `cfg`.
    pub fn inverse_with(&self, cfg: &GeomCfg) -> Result<Mat, MatError> {
        if self.is_identity() {
            return Ok(Self::IDENTITY);
        }
        let det = self.determinant();
        if !self.is_invertible_with(cfg) {
            return Err(MatError::NotInvertible { determinant: det });
        }
        Ok(Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    /// `self := self ∘ input`: the result applies `input` first, then the old `self`.
    pub fn post_multiply(&mut self, input: &Mat) -> &mut Self {
        *self = Self::from_homogeneous(&(self.to_homogeneous() * input.to_homogeneous()));
        self
    }

    /// `self := input ∘ self`: the result applies the old `self` first, then `input`.
    pub fn pre_multiply(&mut self, input: &Mat) -> &mut Self {
        *self = Self::from_homogeneous(&(input.to_homogeneous() * self.to_homogeneous()));
        self
    }

    /// Pure rotation about the origin; translation is zeroed.
    pub fn set_rotation(&mut self, radians: f64) -> &mut Self {
        let (sin, cos) = radians.sin_cos();
        *self = Self::new(cos, sin, -sin, cos, 0.0, 0.0);
        self
    }

    /// Rotation about `pivot`: translate by `-pivot`, rotate, translate back.
    pub fn set_rotation_about(&mut self, radians: f64, pivot: Vect) -> &mut Self {
        self.set_rotation(radians);
        self.post_multiply(&Self::new(1.0, 0.0, 0.0, 1.0, -pivot.x, -pivot.y));
        self.pre_multiply(&Self::new(1.0, 0.0, 0.0, 1.0, pivot.x, pivot.y))
    }

    /// Apply the full affine map to `v` in place.
    #[inline]
    pub fn transform_point<'v>(&self, v: &'v mut Vect) -> &'v mut Vect {
        let (x, y) = (v.x, v.y);
        v.x = self.a * x + self.c * y + self.e;
        v.y = self.b * x + self.d * y + self.f;
        v
    }

    /// Apply only the linear part to `v` in place.
    #[inline]
    pub fn transform_sans_translate<'v>(&self, v: &'v mut Vect) -> &'v mut Vect {
        let (x, y) = (v.x, v.y);
        v.x = self.a * x + self.c * y;
        v.y = self.b * x + self.d * y;
        v
    }

    /// Image of the direction `radians` under the linear part, in `(−π, π]`.
    pub fn transform_angle(&self, radians: f64) -> f64 {
        let mut v = Vect::new(radians.cos(), radians.sin());
        let theta = self.transform_sans_translate(&mut v).angle();
        if theta <= -PI {
            theta + TAU
        } else {
            theta
        }
    }

    /// [`Mat::transform_angle`] in degrees, rounded to an integer in `[0, 360)`.
    pub fn transform_degrees(&self, degrees: f64) -> f64 {
        let out = self.transform_angle(degrees.to_radians()).to_degrees().round();
        out.rem_euclid(360.0) + 0.0
    }

    /// Round all six coefficients to `dp` decimal places.
    pub fn precision(&mut self, dp: u32) -> &mut Self {
        for x in [
            &mut self.a,
            &mut self.b,
            &mut self.c,
            &mut self.d,
            &mut self.e,
            &mut self.f,
        ] {
            *x = round_dp(*x, dp);
        }
        self
    }

    #[inline]
    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.e += dx;
        self.f += dy;
        self
    }
}

impl From<[f64; 6]> for Mat {
    #[inline]
    fn from([a, b, c, d, e, f]: [f64; 6]) -> Self {
        Self { a, b, c, d, e, f }
    }
}

impl FromStr for Mat {
    type Err = MatError;

    /// Parse `matrix(a, b, c, d, e, f)`; only commas separate the literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MatError::Parse {
            input: s.to_string(),
        };
        let body = s
            .trim()
            .strip_prefix("matrix(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;
        let values = body
            .split(',')
            .map(|lit| lit.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| err())?;
        let coeffs: [f64; 6] = values.try_into().map_err(|_| err())?;
        Ok(Self::from(coeffs))
    }
}

impl fmt::Display for Mat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix({}, {}, {}, {}, {}, {})",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}
