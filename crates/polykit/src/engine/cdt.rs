//! Constrained Delaunay triangulation via `spade`.
//!
//! Model
//! - Insert every ring vertex, then add each ring edge as a constraint.
//! - Keep the inner faces whose centroid lies inside the outline and outside every
//!   hole; everything else belongs to the convex hull fill or to a hole.
//!
//! Stricter than `EarClip`: repeated vertices (two holes touching the same boundary
//! point, a hole touching the outline) and crossing ring edges are rejected, so
//! callers can fall back to the fast path.

use std::collections::HashMap;

use spade::handles::FixedVertexHandle;
use spade::{ConstrainedDelaunayTriangulation, Point2, Triangulation as _};

use super::{TriangulationError, Triangulator};
use crate::geom2::util::winding_number;
use crate::geom2::Vect;

/// Constrained Delaunay triangulation of the rings, no refinement.
#[derive(Clone, Debug, Default)]
pub struct ConstrainedDelaunay {
    /// Interior points to insert. Triangles index the ring points only, so this
    /// must stay empty.
    pub steiner: Vec<Vect>,
}

impl Triangulator for ConstrainedDelaunay {
    fn triangulate(
        &self,
        outline: &[Vect],
        holes: &[Vec<Vect>],
    ) -> Result<Vec<[usize; 3]>, TriangulationError> {
        if !self.steiner.is_empty() {
            return Err(TriangulationError::SteinerUnsupported {
                count: self.steiner.len(),
            });
        }
        if outline.len() < 3 {
            return Err(TriangulationError::TooFewPoints {
                count: outline.len(),
            });
        }
        let pts: Vec<Vect> = outline
            .iter()
            .chain(holes.iter().flatten())
            .copied()
            .collect();
        check_distinct(&pts)?;

        let mut cdt: ConstrainedDelaunayTriangulation<Point2<f64>> =
            ConstrainedDelaunayTriangulation::new();
        let mut handles: Vec<FixedVertexHandle> = Vec::with_capacity(pts.len());
        let mut index_of: HashMap<usize, usize> = HashMap::with_capacity(pts.len());
        for (i, p) in pts.iter().enumerate() {
            let h = cdt
                .insert(Point2::new(p.x, p.y))
                .map_err(|err| TriangulationError::Engine {
                    reason: format!("{err:?}"),
                })?;
            index_of.insert(h.index(), i);
            handles.push(h);
        }
        for (from, to) in ring_edges(outline.len(), holes) {
            if !cdt.can_add_constraint(handles[from], handles[to]) {
                return Err(TriangulationError::CrossingEdges { from, to });
            }
            cdt.add_constraint(handles[from], handles[to]);
        }

        let mut tris = Vec::with_capacity(cdt.num_inner_faces());
        for face in cdt.inner_faces() {
            let vs = face.vertices();
            let c = vs.iter().fold(Vect::zero(), |acc, v| {
                let p = v.position();
                acc + Vect::new(p.x, p.y)
            }) * (1.0 / 3.0);
            if !inside(c, outline, holes) {
                continue;
            }
            let mut t = [0; 3];
            for (slot, v) in t.iter_mut().zip(vs.iter()) {
                *slot = *index_of
                    .get(&v.fix().index())
                    .ok_or_else(|| TriangulationError::Engine {
                        reason: "face references an unknown vertex".into(),
                    })?;
            }
            tris.push(t);
        }
        Ok(tris)
    }
}

fn check_distinct(pts: &[Vect]) -> Result<(), TriangulationError> {
    let mut seen: HashMap<(u64, u64), usize> = HashMap::with_capacity(pts.len());
    for (i, p) in pts.iter().enumerate() {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Err(TriangulationError::NonFinite);
        }
        // +0.0 folds -0.0 onto 0.0 so the bit patterns compare as values
        let key = ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
        if let Some(&first) = seen.get(&key) {
            return Err(TriangulationError::DuplicatePoint { first, second: i });
        }
        seen.insert(key, i);
    }
    Ok(())
}

/// Boundary edges of every ring, as indices into the flattened point list.
fn ring_edges(outline_len: usize, holes: &[Vec<Vect>]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = 0;
    for len in std::iter::once(outline_len).chain(holes.iter().map(Vec::len)) {
        for k in 0..len {
            out.push((start + k, start + (k + 1) % len));
        }
        start += len;
    }
    out
}

fn inside(p: Vect, outline: &[Vect], holes: &[Vec<Vect>]) -> bool {
    winding_number(outline, p) != 0 && holes.iter().all(|h| winding_number(h, p) == 0)
}
