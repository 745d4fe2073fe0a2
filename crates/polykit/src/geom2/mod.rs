//! 2D geometry kernel: points, affine matrices, polygons with holes.
//!
//! Purpose
//! - `Vect` and `Mat` are small `Copy` values with in-place, chainable mutators.
//! - `Poly` owns its rings, opaque metadata and one triangulation cache that every
//!   mutating call keeps consistent before returning.
//! - Boolean operations and triangulation go through the `engine` traits.
//!
//! Conventions
//! - Rings are implicitly closed. The interchange form is `PolyRep` (ring 0 = outline).
//! - Tolerances live in `GeomCfg`.
//!
//! Code cross-refs: `Vect`, `Mat`, `Poly`, `PolyRep`, `engine::{Triangulator, Clipper}`

mod boolean;
mod mat;
mod poly;
pub mod rand;
mod rect;
pub mod rep;
mod types;
pub mod util;
mod vect;

pub use mat::{Mat, MatError};
pub use poly::Poly;
pub use rect::Rect;
pub use rep::{Meta, PolyRep, Ring, RingSet};
pub use types::{AngledRect, GeomCfg, Tangents, Triangulation, EPS_DET};
pub use util::{point_in_triangle, ring_area};
pub use vect::Vect;
