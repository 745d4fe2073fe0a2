//! Pluggable algorithmic engines behind `Poly`.
//!
//! Purpose
//! - Keep triangulation and boolean clipping swappable: `Poly` only talks to the
//!   `Triangulator` and `Clipper` traits, never to a concrete backend.
//!
//! Backends
//! - `EarClip`: ear-clipping via `earcutr` (fast path, used for the cached triangulation).
//! - `ConstrainedDelaunay`: constrained Delaunay triangulation via `spade` (quality path).
//! - `GeoClipper`: boolean clipping via `geo::BooleanOps` over ring sets.
//!
//! Code cross-refs: `geom2::Poly::{fast_triangulate, quality_triangulate, union, cut_out_safely}`

use std::fmt;

use crate::geom2::{RingSet, Vect};

pub mod cdt;
pub mod earcut;
pub mod overlay;

pub use cdt::ConstrainedDelaunay;
pub use earcut::EarClip;
pub use overlay::GeoClipper;

/// Triangulates a polygon with holes.
///
/// Returned triples index the flattened list `outline ++ holes[0] ++ holes[1] ++ ...`.
pub trait Triangulator {
    fn triangulate(
        &self,
        outline: &[Vect],
        holes: &[Vec<Vect>],
    ) -> Result<Vec<[usize; 3]>, TriangulationError>;
}

/// Boolean operation selector for [`Clipper::clip`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipOp {
    Union,
    Intersection,
    /// `subject − clip`.
    Difference,
}

/// Boolean clipping over polygon-with-holes ring sets.
///
/// Each operand is the union of its ring sets. The result may merge, split or
/// eliminate input polygons.
pub trait Clipper {
    fn clip(
        &self,
        op: ClipOp,
        subject: &[RingSet],
        clip: &[RingSet],
    ) -> Result<Vec<RingSet>, ClipError>;
}

/// Errors surfaced by triangulation engines.
#[derive(Debug, Clone, PartialEq)]
pub enum TriangulationError {
    /// Outline has fewer than three points.
    TooFewPoints { count: usize },
    /// Non-finite coordinate in the input.
    NonFinite,
    /// Two rings share a vertex (e.g. two holes touching the same boundary point).
    DuplicatePoint { first: usize, second: usize },
    /// Interior Steiner points were supplied but the engine cannot place them.
    SteinerUnsupported { count: usize },
    /// Ring edges `from`-`to` cross an edge that was already constrained.
    CrossingEdges { from: usize, to: usize },
    /// The backing library rejected the input.
    Engine { reason: String },
}

impl fmt::Display for TriangulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { count } => {
                write!(f, "outline needs at least 3 points, got {count}")
            }
            Self::NonFinite => write!(f, "input contains a non-finite coordinate"),
            Self::DuplicatePoint { first, second } => {
                write!(f, "points {first} and {second} coincide")
            }
            Self::SteinerUnsupported { count } => {
                write!(f, "{count} Steiner points supplied but not supported")
            }
            Self::CrossingEdges { from, to } => {
                write!(f, "edge {from}-{to} crosses another ring edge")
            }
            Self::Engine { reason } => write!(f, "triangulation engine failed: {reason}"),
        }
    }
}

impl std::error::Error for TriangulationError {}

/// Errors surfaced by clip engines.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipError {
    /// Non-finite coordinate in ring set `polygon`.
    NonFinite { polygon: usize },
    /// A step of a multi-cutter subtraction failed.
    Cutter { index: usize, source: Box<ClipError> },
}

impl fmt::Display for ClipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { polygon } => {
                write!(f, "polygon {polygon} contains a non-finite coordinate")
            }
            Self::Cutter { index, source } => write!(f, "cutter {index}: {source}"),
        }
    }
}

impl std::error::Error for ClipError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cutter { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
