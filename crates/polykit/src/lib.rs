//! 2D polygon geometry kernel.
//!
//! - `geom2`: `Vect`, `Mat`, `Poly` and the `PolyRep` interchange format.
//! - `engine`: swappable triangulation and boolean-clipping backends.
//!
//! API Policy
//! - Mutators take `&mut self` and return `&mut Self`; callers chain in place.
//! - Fallible operations return `Result` with a typed error per module.

pub mod engine;
pub mod geom2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{GeomCfg, Mat, Poly, PolyRep, Vect};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::engine::{
        ClipError, ClipOp, Clipper, ConstrainedDelaunay, EarClip, GeoClipper, TriangulationError,
        Triangulator,
    };
    pub use crate::geom2::rand::{
        draw_polygon_radial, draw_polygon_with_hole, RadialCfg, ReplayToken, VertexCount,
    };
    pub use crate::geom2::{
        point_in_triangle, ring_area, AngledRect, GeomCfg, Mat, MatError, Meta, Poly, PolyRep,
        Rect, Ring, RingSet, Tangents, Triangulation, Vect,
    };
}
