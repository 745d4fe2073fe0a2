//! Random star-shaped polygons (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic sampler for simple polygons used by property tests and benchmarks.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter, keep the angular order. Angular jitter stays below half a spacing,
//!   so the result is simple and star-shaped with respect to `center`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `Poly`, `geom2::tests` (property tests), `benches/poly_bench.rs`

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::poly::Poly;
use super::vect::Vect;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49]
    /// ([0, 0.24] for triangles).
    pub angle_jitter_frac: f64,
    /// Radii = `base_radius * (1 + u)`, with `u∈[-radial_jitter, radial_jitter]`. Clamped to [0, 0.9].
    pub radial_jitter: f64,
    pub base_radius: f64,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
    pub center: Vect,
}
impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            random_phase: true,
            center: Vect::zero(),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

fn radial_ring(cfg: &RadialCfg, rng: &mut StdRng) -> Vec<Vect> {
    let n = cfg.vertex_count.sample(rng);
    // consecutive gaps stay below π, which a triangle only allows up to Δ/4 jitter
    let aj = cfg
        .angle_jitter_frac
        .clamp(0.0, if n == 3 { 0.24 } else { 0.49 });
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = TAU / n as f64;
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * TAU
    } else {
        0.0
    };
    (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let th = phase + k as f64 * delta + jitter;
            let r = (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj) * r0;
            Vect::new(cfg.center.x + th.cos() * r, cfg.center.y + th.sin() * r)
        })
        .collect()
}

/// Draw a simple star-shaped polygon, canonical orientation, no holes.
pub fn draw_polygon_radial(cfg: RadialCfg, tok: ReplayToken) -> Poly {
    let mut rng = tok.to_std_rng();
    let mut poly = Poly::new(radial_ring(&cfg, &mut rng));
    poly.fix_orientation();
    poly
}

/// Like [`draw_polygon_radial`] plus one hole: the outline shrunk by `hole_scale`
/// about `cfg.center`, reversed. `hole_scale` is clamped to [0.05, 0.95].
pub fn draw_polygon_with_hole(cfg: RadialCfg, tok: ReplayToken, hole_scale: f64) -> Poly {
    let poly = draw_polygon_radial(cfg, tok);
    let s = hole_scale.clamp(0.05, 0.95);
    let c = cfg.center;
    let hole: Vec<Vect> = poly
        .outline()
        .iter()
        .rev()
        .map(|&p| Vect::new(c.x + (p.x - c.x) * s, c.y + (p.y - c.y) * s))
        .collect();
    Poly::with_holes(poly.outline().to_vec(), vec![hole])
}
