//! Boolean clipping backed by `geo::BooleanOps`.
//!
//! Model
//! - Each operand is folded into one `MultiPolygon` by successive unions, so
//!   overlapping members of the same operand merge before the operation runs.
//! - Input rings are normalized first: closing and consecutive duplicates dropped,
//!   outer rings anticlockwise and holes clockwise in the y-up frame.
//! - Output rings are open, collinear vertices within `eps_snap · extent` are
//!   removed, outers come back with positive signed area and holes with negative.
//!
//! Code cross-refs: `Poly::{union, intersect, cut_out, cut_out_safely}`

use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon};
use tracing::debug;

use super::{ClipError, ClipOp, Clipper};
use crate::geom2::util::{cross, ring_area};
use crate::geom2::{GeomCfg, Ring, RingSet, Vect};

/// Polygon clipper over `geo` multipolygons. Output cleanup uses `GeomCfg::eps_snap`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeoClipper {
    pub cfg: GeomCfg,
}

impl GeoClipper {
    pub fn new(cfg: GeomCfg) -> Self {
        Self { cfg }
    }
}

impl Clipper for GeoClipper {
    fn clip(
        &self,
        op: ClipOp,
        subject: &[RingSet],
        clip: &[RingSet],
    ) -> Result<Vec<RingSet>, ClipError> {
        let a = operand(subject)?;
        let b = operand(clip)?;
        let out = match op {
            ClipOp::Union => a.union(&b),
            ClipOp::Intersection => a.intersection(&b),
            ClipOp::Difference => a.difference(&b),
        };
        let extent = subject
            .iter()
            .chain(clip)
            .flatten()
            .flatten()
            .flat_map(|c| [c[0].abs(), c[1].abs()])
            .fold(1.0, f64::max);
        let eps = self.cfg.eps_snap * extent;
        let sets: Vec<RingSet> = out.0.iter().filter_map(|p| ring_set(p, eps)).collect();
        debug!(
            ?op,
            subject = subject.len(),
            clip = clip.len(),
            polygons = sets.len(),
            holes = sets.iter().map(|s| s.len() - 1).sum::<usize>(),
            "clip"
        );
        Ok(sets)
    }
}

fn operand(sets: &[RingSet]) -> Result<MultiPolygon<f64>, ClipError> {
    let mut acc = MultiPolygon::new(Vec::new());
    for (polygon, set) in sets.iter().enumerate() {
        if set
            .iter()
            .flatten()
            .any(|c| !(c[0].is_finite() && c[1].is_finite()))
        {
            return Err(ClipError::NonFinite { polygon });
        }
        if let Some(p) = to_polygon(set) {
            acc = acc.union(&MultiPolygon::new(vec![p]));
        }
    }
    Ok(acc)
}

/// Ring 0 is the outer boundary; an outer with fewer than 3 distinct points yields `None`.
fn to_polygon(set: &RingSet) -> Option<Polygon<f64>> {
    let mut rings = set.iter().enumerate().filter_map(|(ri, ring)| {
        let pts = normalized(ring, ri == 0)?;
        Some((ri, line_string(&pts)))
    });
    let (first, exterior) = rings.next()?;
    if first != 0 {
        return None;
    }
    Some(Polygon::new(exterior, rings.map(|(_, ls)| ls).collect()))
}

fn normalized(ring: &Ring, outer: bool) -> Option<Vec<Vect>> {
    let mut pts: Vec<Vect> = Vec::with_capacity(ring.len());
    for &c in ring {
        let p = Vect::from(c);
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    let area = ring_area(&pts);
    if pts.len() < 3 || area == 0.0 {
        return None;
    }
    if (area > 0.0) != outer {
        pts.reverse();
    }
    Some(pts)
}

fn line_string(pts: &[Vect]) -> LineString<f64> {
    LineString::new(pts.iter().map(|p| Coord { x: p.x, y: p.y }).collect())
}

fn ring_set(poly: &Polygon<f64>, eps: f64) -> Option<RingSet> {
    let outer = open_ring(poly.exterior(), eps, true)?;
    let mut set = vec![outer];
    set.extend(poly.interiors().iter().filter_map(|h| open_ring(h, eps, false)));
    Some(set)
}

fn open_ring(ls: &LineString<f64>, eps: f64, outer: bool) -> Option<Ring> {
    let mut pts: Vec<Vect> = Vec::with_capacity(ls.0.len());
    for c in ls.coords() {
        let p = Vect::new(c.x, c.y);
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    let mut pts = drop_collinear(pts, eps);
    let area = ring_area(&pts);
    if pts.len() < 3 || area.abs() <= eps * eps {
        return None;
    }
    if (area > 0.0) != outer {
        pts.reverse();
    }
    Some(pts.into_iter().map(<[f64; 2]>::from).collect())
}

/// Removes vertices within `eps` of the line through their neighbours.
fn drop_collinear(mut ring: Vec<Vect>, eps: f64) -> Vec<Vect> {
    let mut changed = true;
    while changed && ring.len() >= 3 {
        changed = false;
        let n = ring.len();
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            let len = (next - prev).length();
            if len > 0.0 && cross(prev, next, ring[i]).abs() / len <= eps {
                ring.remove(i);
                changed = true;
                break;
            }
        }
    }
    ring
}
