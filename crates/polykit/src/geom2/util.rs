use super::vect::Vect;

/// Round `x` to `dp` decimal places.
#[inline]
pub(crate) fn round_dp(x: f64, dp: u32) -> f64 {
    let k = 10f64.powi(dp as i32);
    (x * k).round() / k
}

/// Orientation of `c` relative to the directed line `a → b` (twice the signed triangle area).
#[inline]
pub fn cross(a: Vect, b: Vect, c: Vect) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Signed triangle area, positive for a→b→c anticlockwise in a y-up frame.
#[inline]
pub fn triangle_area(a: Vect, b: Vect, c: Vect) -> f64 {
    0.5 * cross(a, b, c)
}

/// Signed shoelace area of an implicitly closed ring (positive for anticlockwise in a y-up frame).
pub fn ring_area(ring: &[Vect]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, p) in ring.iter().enumerate() {
        let q = ring[(i + 1) % ring.len()];
        acc += p.x * q.y - q.x * p.y;
    }
    0.5 * acc
}

/// Sign-based point-in-triangle test; points on an edge count as inside.
pub fn point_in_triangle(p: Vect, a: Vect, b: Vect, c: Vect) -> bool {
    let d1 = cross(a, b, p);
    let d2 = cross(b, c, p);
    let d3 = cross(c, a, p);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Winding number of `ring` around `p` (Sunday's crossing rule).
pub(crate) fn winding_number(ring: &[Vect], p: Vect) -> i32 {
    let mut wn = 0;
    for (i, &a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        if a.y <= p.y {
            if b.y > p.y && cross(a, b, p) > 0.0 {
                wn += 1;
            }
        } else if b.y <= p.y && cross(a, b, p) < 0.0 {
            wn -= 1;
        }
    }
    wn
}
