use super::{TriangulationError, Triangulator};
use crate::geom2::Vect;

/// Ear-clipping triangulation backed by `earcutr`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EarClip;

impl Triangulator for EarClip {
    fn triangulate(
        &self,
        outline: &[Vect],
        holes: &[Vec<Vect>],
    ) -> Result<Vec<[usize; 3]>, TriangulationError> {
        if outline.len() < 3 {
            return Err(TriangulationError::TooFewPoints {
                count: outline.len(),
            });
        }
        let total = outline.len() + holes.iter().map(Vec::len).sum::<usize>();
        let mut coords: Vec<f64> = Vec::with_capacity(2 * total);
        let mut hole_starts: Vec<usize> = Vec::with_capacity(holes.len());
        coords.extend(outline.iter().flat_map(|p| [p.x, p.y]));
        for hole in holes {
            hole_starts.push(coords.len() / 2);
            coords.extend(hole.iter().flat_map(|p| [p.x, p.y]));
        }
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(TriangulationError::NonFinite);
        }

        let idx = earcutr::earcut(&coords, &hole_starts, 2).map_err(|_| {
            TriangulationError::Engine {
                reason: "earcut rejected the rings".into(),
            }
        })?;
        if idx.len() % 3 != 0 {
            return Err(TriangulationError::Engine {
                reason: format!("earcut returned {} indices", idx.len()),
            });
        }
        Ok(idx.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect())
    }
}
