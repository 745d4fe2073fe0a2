//! Polygon with holes, metadata and a cached triangulation.
//!
//! Purpose
//! - One mutable polygon type for layout pipelines: build, transform in place, cut,
//!   merge, triangulate, hit-test.
//!
//! Cache policy
//! - At most one cached triangulation: index triples into `outline ++ holes[0] ++ ...`
//!   plus the matching point triples.
//! - Pure coordinate edits (`translate`, `scale`, `precision`, `round`) recompute the
//!   point triples from the cached indices before returning.
//! - Edits that can change ring order or membership (`apply_matrix`, `reverse`,
//!   `remove_holes`, `clean_final_reps`) drop the cache.
//! - `contains` and `triangle_polys` read the cache and fill it on demand, which is why
//!   they take `&mut self`.
//!
//! Orientation
//! - `anticlockwise` is the predicate `Σ (x[i+1] − x[i])·(y[i+1] + y[i]) > 0` over the
//!   closed outline. `fix_orientation` reverses exactly when it holds, so afterwards the
//!   outline has positive shoelace area in a y-up frame.
//!
//! Code cross-refs: `boolean.rs` (set operations), `engine::{EarClip, ConstrainedDelaunay}`

use std::f64::consts::TAU;

use serde_json::Value;
use tracing::warn;

use super::mat::Mat;
use super::rect::Rect;
use super::rep::{Meta, PolyRep, Ring, RingSet};
use super::types::{AngledRect, Tangents, Triangulation};
use super::util::{cross, point_in_triangle, ring_area};
use super::vect::Vect;
use crate::engine::{ConstrainedDelaunay, EarClip, TriangulationError, Triangulator};

#[derive(Clone, Debug, Default)]
struct TriCache {
    tris: Vec<[usize; 3]>,
    triangles: Vec<[Vect; 3]>,
}

/// A polygon: outline ring, hole rings and opaque metadata.
///
/// Holes are assumed to lie inside the outline; neither simplicity nor hole
/// containment is checked.
#[derive(Debug)]
pub struct Poly<M = Value> {
    outline: Vec<Vect>,
    holes: Vec<Vec<Vect>>,
    pub meta: Meta<M>,
    cache: Option<TriCache>,
}

/// Deep copy of rings and metadata; the clone starts without a triangulation.
impl<M: Clone> Clone for Poly<M> {
    fn clone(&self) -> Self {
        Self {
            outline: self.outline.clone(),
            holes: self.holes.clone(),
            meta: self.meta.clone(),
            cache: None,
        }
    }
}

/// Exact equality of rings and metadata. The cache is not compared.
impl<M: PartialEq> PartialEq for Poly<M> {
    fn eq(&self, other: &Self) -> bool {
        self.outline == other.outline && self.holes == other.holes && self.meta == other.meta
    }
}

impl<M> Poly<M> {
    pub fn new(outline: Vec<Vect>) -> Self {
        Self::with_holes(outline, Vec::new())
    }

    pub fn with_holes(outline: Vec<Vect>, holes: Vec<Vec<Vect>>) -> Self {
        Self {
            outline,
            holes,
            meta: Meta::new(),
            cache: None,
        }
    }

    /// Builder-style metadata replacement.
    pub fn with_meta(mut self, meta: Meta<M>) -> Self {
        self.meta = meta;
        self
    }

    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(rect.points().to_vec())
    }

    /// Regular `segments`-gon inscribed in the circle, starting at angle 0.
    pub fn circle(center: Vect, radius: f64, segments: usize) -> Self {
        let n = segments as f64;
        let outline = (0..segments)
            .map(|i| {
                let t = TAU * i as f64 / n;
                Vect::new(center.x + radius * t.cos(), center.y + radius * t.sin())
            })
            .collect();
        Self::new(outline)
    }

    /// Rectangle of the base size at the origin, rotated by `angle`, then moved to
    /// the base corner.
    pub fn from_angled_rect(ar: &AngledRect) -> Self {
        let r = ar.base_rect;
        let mut poly = Self::from_rect(&Rect::new(0.0, 0.0, r.width, r.height));
        let mut m = Mat::identity();
        m.set_rotation(ar.angle).translate(r.x, r.y);
        poly.apply_matrix(&m, false);
        poly
    }

    pub fn from_rep(rep: PolyRep<M>) -> Self {
        Self::from_rings(rep.coordinates).with_meta(rep.meta)
    }

    /// Ring 0 becomes the outline; an empty ring set gives an empty polygon.
    pub(crate) fn from_rings(rings: RingSet) -> Self {
        let mut rings = rings
            .into_iter()
            .map(|r| r.into_iter().map(Vect::from).collect::<Vec<_>>());
        let outline = rings.next().unwrap_or_default();
        Self::with_holes(outline, rings.collect())
    }

    #[inline]
    pub fn outline(&self) -> &[Vect] {
        &self.outline
    }

    #[inline]
    pub fn holes(&self) -> &[Vec<Vect>] {
        &self.holes
    }

    fn rings(&self) -> impl Iterator<Item = &Vec<Vect>> {
        std::iter::once(&self.outline).chain(self.holes.iter())
    }

    fn points_mut(&mut self) -> impl Iterator<Item = &mut Vect> {
        self.outline
            .iter_mut()
            .chain(self.holes.iter_mut().flat_map(|h| h.iter_mut()))
    }

    /// Outline points followed by every hole's points.
    pub fn all_points(&self) -> Vec<Vect> {
        self.rings().flatten().copied().collect()
    }

    /// Centroid of all points (vertex average).
    pub fn center(&self) -> Vect {
        Vect::average(&self.all_points())
    }

    /// Bounding box of the outline.
    pub fn rect(&self) -> Rect {
        Rect::from_points(&self.outline)
    }

    /// Outline area minus hole areas.
    pub fn area(&self) -> f64 {
        ring_area(&self.outline).abs() - self.holes.iter().map(|h| ring_area(h).abs()).sum::<f64>()
    }

    /// Closed edges of every ring, outline first.
    pub fn line_segs(&self) -> Vec<[Vect; 2]> {
        self.rings()
            .flat_map(|r| (0..r.len()).map(move |i| [r[i], r[(i + 1) % r.len()]]))
            .collect()
    }

    /// `M x,y x,y … Z` per ring, outline first, separated by spaces.
    pub fn svg_path(&self) -> String {
        self.rings()
            .filter(|r| !r.is_empty())
            .map(|r| {
                let pts: Vec<String> = r.iter().map(Vect::to_string).collect();
                format!("M {} Z", pts.join(" "))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Unit edge directions of the closed rings.
    pub fn tangents(&self) -> Tangents {
        fn ring_tangents(ring: &[Vect]) -> Vec<Vect> {
            let mut closed = ring.to_vec();
            closed.extend(ring.first().copied());
            closed
                .windows(2)
                .map(|w| {
                    let mut d = w[1] - w[0];
                    d.normalize();
                    d
                })
                .collect()
        }
        Tangents {
            outer: ring_tangents(&self.outline),
            inner: self.holes.iter().map(|h| ring_tangents(h)).collect(),
        }
    }

    pub(crate) fn ring_set(&self) -> RingSet {
        self.rings()
            .map(|r| r.iter().map(|&p| p.into()).collect::<Ring>())
            .collect()
    }

    // ----- transforms ------------------------------------------------------

    pub fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.points_mut().for_each(|p| {
            p.translate(dx, dy);
        });
        self.refresh_cache();
        self
    }

    pub fn scale(&mut self, s: f64) -> &mut Self {
        self.points_mut().for_each(|p| {
            p.scale(s);
        });
        self.refresh_cache();
        self
    }

    pub fn precision(&mut self, dp: u32) -> &mut Self {
        self.points_mut().for_each(|p| {
            p.precision(dp);
        });
        self.refresh_cache();
        self
    }

    pub fn round(&mut self) -> &mut Self {
        self.points_mut().for_each(|p| {
            p.round();
        });
        self.refresh_cache();
        self
    }

    /// Reverse the point order of the outline and of each hole.
    pub fn reverse(&mut self) -> &mut Self {
        self.outline.reverse();
        self.holes.iter_mut().for_each(|h| h.reverse());
        self.cache = None;
        self
    }

    /// Apply `m` to every point; only its linear part when `sans_translate`.
    pub fn apply_matrix(&mut self, m: &Mat, sans_translate: bool) -> &mut Self {
        if m.is_identity() {
            return self;
        }
        for p in self.points_mut() {
            if sans_translate {
                m.transform_sans_translate(p);
            } else {
                m.transform_point(p);
            }
        }
        self.cache = None;
        self
    }

    pub fn remove_holes(&mut self) -> &mut Self {
        self.holes.clear();
        self.cache = None;
        self
    }

    /// Strip trailing points equal to the ring's first point.
    pub fn clean_final_reps(&mut self) -> &mut Self {
        fn strip(ring: &mut Vec<Vect>) {
            while ring.len() > 1 && ring.first() == ring.last() {
                ring.pop();
            }
        }
        strip(&mut self.outline);
        self.holes.iter_mut().for_each(strip);
        self.cache = None;
        self
    }

    // ----- orientation -----------------------------------------------------

    pub fn anticlockwise(&self) -> bool {
        let n = self.outline.len();
        let sum: f64 = (0..n)
            .map(|i| {
                let (p, q) = (self.outline[i], self.outline[(i + 1) % n]);
                (q.x - p.x) * (q.y + p.y)
            })
            .sum();
        sum > 0.0
    }

    /// `anticlockwise` from the first three outline points; valid for convex outlines.
    pub fn anticlockwise_convex(&self) -> bool {
        match self.outline.as_slice() {
            [p, q, r, ..] => cross(*p, *q, *r) < 0.0,
            _ => false,
        }
    }

    pub fn fix_orientation(&mut self) -> &mut Self {
        if self.anticlockwise() {
            self.reverse();
        }
        self
    }

    // ----- triangulation ---------------------------------------------------

    fn set_cache(&mut self, tris: Vec<[usize; 3]>) {
        let pts = self.all_points();
        let triangles = tris.iter().map(|&[i, j, k]| [pts[i], pts[j], pts[k]]).collect();
        self.cache = Some(TriCache { tris, triangles });
    }

    fn refresh_cache(&mut self) {
        if let Some(tris) = self.cache.take().map(|c| c.tris) {
            self.set_cache(tris);
        }
    }

    fn cache(&mut self) -> &TriCache {
        if self.cache.is_none() {
            self.fast_triangulate();
        }
        self.cache.get_or_insert_with(TriCache::default)
    }

    fn snapshot(&self) -> Triangulation {
        Triangulation {
            vs: self.all_points(),
            tris: self.cache.as_ref().map(|c| c.tris.clone()).unwrap_or_default(),
        }
    }

    /// Cached triangulation, ear-clipped on first use.
    pub fn triangulation(&mut self) -> Triangulation {
        self.cache();
        self.snapshot()
    }

    /// Ear-clip and replace the cache. An engine failure leaves an empty triangulation.
    pub fn fast_triangulate(&mut self) -> Triangulation {
        match EarClip.triangulate(&self.outline, &self.holes) {
            Ok(tris) => self.set_cache(tris),
            Err(err) => {
                warn!(error = %err, points = self.outline.len(), "ear clipping failed");
                self.set_cache(Vec::new());
            }
        }
        self.snapshot()
    }

    /// Constrained Delaunay triangulation, falling back to `fast_triangulate` on failure.
    pub fn quality_triangulate(&mut self) -> Triangulation {
        match ConstrainedDelaunay::default().triangulate(&self.outline, &self.holes) {
            Ok(tris) => {
                self.set_cache(tris);
                self.snapshot()
            }
            Err(err) => {
                warn!(error = %err, "quality triangulation failed; using ear clipping");
                self.fast_triangulate()
            }
        }
    }

    /// Triangulate with a caller-chosen engine. On error the cache is left untouched.
    pub fn triangulate_with(
        &mut self,
        engine: &dyn Triangulator,
    ) -> Result<Triangulation, TriangulationError> {
        let tris = engine.triangulate(&self.outline, &self.holes)?;
        self.set_cache(tris);
        Ok(self.snapshot())
    }

    /// The cached triangles as point triples.
    pub fn triangle_polys(&mut self) -> &[[Vect; 3]] {
        &self.cache().triangles
    }

    /// Bounding-box reject, then a scan of the cached triangles. Boundary points count.
    pub fn contains(&mut self, p: Vect) -> bool {
        if !self.rect().contains(p) {
            return false;
        }
        self.cache()
            .triangles
            .iter()
            .any(|&[a, b, c]| point_in_triangle(p, a, b, c))
    }
}

impl<M: Clone> Poly<M> {
    pub fn to_rep(&self) -> PolyRep<M> {
        PolyRep {
            coordinates: self.ring_set(),
            meta: self.meta.clone(),
        }
    }

    /// Clone, optionally transform, fix orientation, snap to 4 decimals, merge `extra_meta`.
    pub fn clean_clone(&self, m: Option<&Mat>, extra_meta: Option<Meta<M>>) -> Self {
        self.clean_clone_with_precision(m, extra_meta, 4)
    }

    pub fn clean_clone_with_precision(
        &self,
        m: Option<&Mat>,
        extra_meta: Option<Meta<M>>,
        dp: u32,
    ) -> Self {
        let mut out = self.clone();
        if let Some(m) = m {
            out.apply_matrix(m, false);
        }
        out.fix_orientation().precision(dp);
        out.meta.extend(extra_meta.unwrap_or_default());
        out
    }
}

impl<M> From<PolyRep<M>> for Poly<M> {
    fn from(rep: PolyRep<M>) -> Self {
        Self::from_rep(rep)
    }
}

impl<M: Clone> From<&Poly<M>> for PolyRep<M> {
    fn from(poly: &Poly<M>) -> Self {
        poly.to_rep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::f64::consts::FRAC_PI_2;

    fn square(x: f64, y: f64, s: f64) -> Vec<Vect> {
        Rect::new(x, y, s, s).points().to_vec()
    }

    fn donut() -> Poly {
        let mut hole = square(1.0, 1.0, 2.0);
        hole.reverse();
        Poly::with_holes(square(0.0, 0.0, 4.0), vec![hole])
    }

    #[test]
    fn diamond_triangulates_into_two_triangles() {
        let mut p: Poly = Poly::circle(Vect::zero(), 1.0, 4);
        let t = p.triangulation();
        assert_eq!(t.tris.len(), 2);
        assert!((t.area() - 2.0).abs() < 1e-9);
        assert_eq!(p.triangle_polys().len(), 2);
    }

    #[test]
    fn convex_centroid_is_contained() {
        let mut p: Poly = Poly::circle(Vect::new(5.0, -3.0), 2.0, 12);
        let c = p.center();
        assert!(p.contains(c));
        assert!(!p.contains(Vect::new(100.0, 100.0)));
        // a vertex is on the boundary
        assert!(p.contains(Vect::new(7.0, -3.0)));
    }

    #[test]
    fn contains_respects_holes() {
        let mut p = donut();
        assert!(p.contains(Vect::new(0.5, 0.5)));
        assert!(!p.contains(Vect::new(2.0, 2.0)));
    }

    #[test]
    fn triangulated_area_matches_polygon_area() {
        let mut p = donut();
        assert!((p.area() - 12.0).abs() < 1e-12);
        assert!((p.triangulation().area() - 12.0).abs() < 1e-9);
        assert!((p.quality_triangulate().area() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn fix_orientation_is_idempotent() {
        let mut p: Poly = Poly::new(vec![
            Vect::new(0.0, 0.0),
            Vect::new(0.0, 1.0),
            Vect::new(1.0, 1.0),
            Vect::new(1.0, 0.0),
        ]);
        assert!(p.anticlockwise());
        assert!(p.anticlockwise_convex());
        p.fix_orientation();
        let once = p.clone();
        p.fix_orientation();
        assert_eq!(p, once);
        assert!(!p.anticlockwise());
        assert!(!p.anticlockwise_convex());
        assert!(ring_area(p.outline()) > 0.0);
    }

    #[test]
    fn coordinate_edits_recompute_the_cache() {
        let mut p: Poly = Poly::new(square(0.0, 0.0, 1.0));
        let before = p.triangulation();
        p.translate(1.0, 2.0).scale(2.0);
        let cache = p.cache.as_ref().unwrap();
        assert_eq!(cache.tris, before.tris);
        for (&[i, j, k], tri) in cache.tris.iter().zip(&cache.triangles) {
            let pts = p.all_points();
            assert_eq!(*tri, [pts[i], pts[j], pts[k]]);
        }
        assert!(p.contains(Vect::new(3.0, 5.0)));
        assert!(!p.contains(Vect::new(1.0, 1.0)));
    }

    #[test]
    fn structural_edits_clear_the_cache() {
        let mut p = donut();
        p.triangulation();
        p.apply_matrix(&Mat::identity(), false);
        assert!(p.cache.is_some());
        p.apply_matrix(&Mat::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0), false);
        assert!(p.cache.is_none());
        p.triangulation();
        p.remove_holes();
        assert!(p.cache.is_none());
        assert!(p.holes().is_empty());
        assert!(p.contains(Vect::new(4.0, 4.0)));
    }

    #[test]
    fn sans_translate_ignores_offset() {
        let mut p: Poly = Poly::new(square(1.0, 0.0, 1.0));
        p.apply_matrix(&Mat::new(1.0, 0.0, 0.0, 1.0, 10.0, 10.0), true);
        assert_eq!(p.outline()[0], Vect::new(1.0, 0.0));
        p.apply_matrix(&Mat::new(1.0, 0.0, 0.0, 1.0, 10.0, 10.0), false);
        assert_eq!(p.outline()[0], Vect::new(11.0, 10.0));
    }

    #[test]
    fn clean_final_reps_strips_closing_duplicates() {
        let mut p: Poly = Poly::from_rings(vec![
            vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0], [0.0, 0.0]],
            vec![[0.1, 0.1], [0.2, 0.1], [0.1, 0.2], [0.1, 0.1]],
        ]);
        p.clean_final_reps();
        assert_eq!(p.outline().len(), 3);
        assert_eq!(p.holes()[0].len(), 3);
    }

    #[test]
    fn segments_tangents_and_svg() {
        let p = donut();
        let segs = p.line_segs();
        assert_eq!(segs.len(), 8);
        assert_eq!(segs[3], [Vect::new(0.0, 4.0), Vect::new(0.0, 0.0)]);
        assert_eq!(segs[4][0], Vect::new(1.0, 3.0));

        let t = p.tangents();
        assert_eq!(
            t.outer,
            vec![
                Vect::new(1.0, 0.0),
                Vect::new(0.0, 1.0),
                Vect::new(-1.0, 0.0),
                Vect::new(0.0, -1.0)
            ]
        );
        assert_eq!(t.inner.len(), 1);
        assert_eq!(t.inner[0][0], Vect::new(1.0, 0.0));

        assert_eq!(p.svg_path(), "M 0,0 4,0 4,4 0,4 Z M 1,3 3,3 3,1 1,1 Z");
    }

    #[test]
    fn rep_round_trip_keeps_meta() {
        let mut p = donut();
        p.meta.insert("id".into(), json!(7));
        let rep = p.to_rep();
        assert_eq!(rep.coordinates.len(), 2);
        assert_eq!(rep.coordinates[0][1], [4.0, 0.0]);
        let back = Poly::from(rep);
        assert_eq!(back, p);
        assert_eq!(back.meta["id"], json!(7));
    }

    #[test]
    fn clone_copies_meta_but_not_cache() {
        let mut p = donut();
        p.meta.insert("k".into(), json!("v"));
        p.triangulation();
        let mut q = p.clone();
        assert!(q.cache.is_none());
        q.translate(1.0, 0.0);
        assert_eq!(p.outline()[0], Vect::zero());
        assert_eq!(q.meta, p.meta);
    }

    #[test]
    fn angled_rect_rotates_about_its_corner() {
        let ar = AngledRect {
            base_rect: Rect::new(1.0, 1.0, 2.0, 1.0),
            angle: FRAC_PI_2,
        };
        let p: Poly = Poly::from_angled_rect(&ar);
        let want = [(1.0, 1.0), (1.0, 3.0), (0.0, 3.0), (0.0, 1.0)];
        for (got, (x, y)) in p.outline().iter().zip(want) {
            assert!(got.equals_almost(Vect::new(x, y), 1e-12), "{got} vs {x},{y}");
        }
    }

    #[test]
    fn clean_clone_transforms_orients_and_merges_meta() {
        let mut p: Poly = Poly::new(vec![
            Vect::new(0.0, 0.0),
            Vect::new(0.0, 1.0),
            Vect::new(1.0, 1.0),
            Vect::new(1.0, 0.0),
        ]);
        p.meta.insert("a".into(), json!(1));
        let m = Mat::new(1.0, 0.0, 0.0, 1.0, 0.123456, 0.0);
        let mut extra = Meta::new();
        extra.insert("b".into(), json!(2));
        let c = p.clean_clone_with_precision(Some(&m), Some(extra), 2);
        assert!(!c.anticlockwise());
        assert!(c.outline().iter().any(|v| v.x == 0.12));
        assert_eq!(c.meta.len(), 2);
        assert_eq!(p.meta.len(), 1);
        assert!(p.anticlockwise());
    }

    #[test]
    fn quality_fallback_still_triangulates() {
        let shared = Vect::new(5.0, 5.0);
        let mut p: Poly = Poly::with_holes(
            square(0.0, 0.0, 10.0),
            vec![
                vec![Vect::new(2.0, 2.0), Vect::new(2.0, 5.0), shared],
                vec![shared, Vect::new(5.0, 8.0), Vect::new(8.0, 8.0)],
            ],
        );
        let t = p.quality_triangulate();
        assert!(!t.tris.is_empty());
        assert!(p.cache.is_some());
    }

    #[test]
    fn triangulate_with_reports_engine_errors() {
        let mut p: Poly = Poly::new(square(0.0, 0.0, 1.0));
        let cdt = ConstrainedDelaunay {
            steiner: vec![Vect::new(0.5, 0.5)],
            ..Default::default()
        };
        assert!(p.triangulate_with(&cdt).is_err());
        assert!(p.cache.is_none());
        assert_eq!(p.triangulate_with(&EarClip).unwrap().tris.len(), 2);
    }

    #[test]
    fn degenerate_outline_has_no_triangles() {
        let mut p: Poly = Poly::new(vec![Vect::zero(), Vect::new(1.0, 0.0)]);
        assert!(p.triangulation().tris.is_empty());
        assert!(!p.contains(Vect::new(0.5, 0.0)));
    }
}
