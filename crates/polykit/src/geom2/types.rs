//! Tolerances and small value types shared across the 2D kernel.
//!
//! - `GeomCfg`: centralizes epsilons for matrix invertibility and clip output cleanup.
//! - `AngledRect`, `Triangulation`, `Tangents`: plain data returned or consumed by `Poly`.
//!
//! Code cross-refs: `mat::Mat::is_invertible`, `engine::GeoClipper`

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::vect::Vect;

/// Determinant threshold below which a matrix counts as singular.
pub const EPS_DET: f64 = 1e-14;

/// Geometry configuration (tolerances).
///
/// `eps_det` is absolute. `eps_snap` is relative: the clipper multiplies it by the
/// extent of its input, so pixel-scale and unit-scale callers see the same behaviour.
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Smallest `|det|` accepted by `Mat::is_invertible_with`.
    pub eps_det: f64,
    /// Collinearity tolerance when cleaning clip output rings.
    pub eps_snap: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_det: EPS_DET,
            eps_snap: 1e-10,
        }
    }
}

/// Axis-aligned rectangle rotated by `angle` radians about its `(x, y)` corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AngledRect {
    pub base_rect: Rect,
    pub angle: f64,
}

/// Triangulation over the flattened point list `outline ++ holes[0] ++ ...`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    pub vs: Vec<Vect>,
    pub tris: Vec<[usize; 3]>,
}

impl Triangulation {
    /// Sum of unsigned triangle areas.
    pub fn area(&self) -> f64 {
        self.tris
            .iter()
            .map(|&[i, j, k]| super::util::triangle_area(self.vs[i], self.vs[j], self.vs[k]).abs())
            .sum()
    }
}

/// Unit edge directions per ring (outline first).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tangents {
    pub outer: Vec<Vect>,
    pub inner: Vec<Vec<Vect>>,
}
