//! Boolean set operations on polygons.
//!
//! Each operand is converted to its interchange ring set and handed to a
//! [`Clipper`]; results come back as fresh polygons with empty metadata and canonical
//! orientation (`anticlockwise() == false`).
//!
//! `cut_out_safely` is the robust entry point for many cutters: union the cutters,
//! union the targets, then subtract one unioned cutter at a time.

use tracing::{debug, warn};

use super::poly::Poly;
use super::rep::RingSet;
use crate::engine::{ClipError, ClipOp, Clipper, GeoClipper};

fn ring_sets<M>(polys: &[Poly<M>]) -> Vec<RingSet> {
    polys.iter().map(Poly::ring_set).collect()
}

fn run<M>(
    clipper: &dyn Clipper,
    op: ClipOp,
    subject: &[Poly<M>],
    clip: &[Poly<M>],
) -> Result<Vec<Poly<M>>, ClipError> {
    let out = clipper.clip(op, &ring_sets(subject), &ring_sets(clip))?;
    Ok(out.into_iter().map(Poly::from_rings).collect())
}

impl<M: Clone> Poly<M> {
    /// Union of all `polys`.
    pub fn union(polys: &[Poly<M>]) -> Result<Vec<Poly<M>>, ClipError> {
        Self::union_with(&GeoClipper::default(), polys)
    }

    pub fn union_with(clipper: &dyn Clipper, polys: &[Poly<M>]) -> Result<Vec<Poly<M>>, ClipError> {
        run(clipper, ClipOp::Union, polys, &[])
    }

    /// Intersection of the union of `a` with the union of `b`.
    pub fn intersect(a: &[Poly<M>], b: &[Poly<M>]) -> Result<Vec<Poly<M>>, ClipError> {
        Self::intersect_with(&GeoClipper::default(), a, b)
    }

    pub fn intersect_with(
        clipper: &dyn Clipper,
        a: &[Poly<M>],
        b: &[Poly<M>],
    ) -> Result<Vec<Poly<M>>, ClipError> {
        run(clipper, ClipOp::Intersection, a, b)
    }

    /// `polys` minus `cutters` in one clip call. No cutters: plain clones.
    pub fn cut_out(cutters: &[Poly<M>], polys: &[Poly<M>]) -> Result<Vec<Poly<M>>, ClipError> {
        Self::cut_out_with(&GeoClipper::default(), cutters, polys)
    }

    pub fn cut_out_with(
        clipper: &dyn Clipper,
        cutters: &[Poly<M>],
        polys: &[Poly<M>],
    ) -> Result<Vec<Poly<M>>, ClipError> {
        if cutters.is_empty() {
            return Ok(polys.to_vec());
        }
        run(clipper, ClipOp::Difference, polys, cutters)
    }

    /// Union cutters, union targets, then subtract the unioned cutters one by one.
    /// A failed step is reported as [`ClipError::Cutter`] with the unioned cutter's index.
    pub fn cut_out_safely(
        cutters: &[Poly<M>],
        polys: &[Poly<M>],
    ) -> Result<Vec<Poly<M>>, ClipError> {
        Self::cut_out_safely_with(&GeoClipper::default(), cutters, polys)
    }

    pub fn cut_out_safely_with(
        clipper: &dyn Clipper,
        cutters: &[Poly<M>],
        polys: &[Poly<M>],
    ) -> Result<Vec<Poly<M>>, ClipError> {
        let cutters = Self::union_with(clipper, cutters)?;
        let targets = Self::union_with(clipper, polys)?;
        debug!(cutters = cutters.len(), targets = targets.len(), "cut_out_safely");
        cutters
            .iter()
            .enumerate()
            .try_fold(targets, |acc, (index, cutter)| {
                Self::cut_out_with(clipper, std::slice::from_ref(cutter), &acc).map_err(|err| {
                    warn!(cutter = index, targets = acc.len(), error = %err, "cut_out_safely step failed");
                    ClipError::Cutter {
                        index,
                        source: Box::new(err),
                    }
                })
            })
    }
}
