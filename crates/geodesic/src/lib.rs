//! Great-circle subdivision by repeated bisection of unit-sphere direction vectors.
//!
//! The midpoint of an arc is the normalized sum of its endpoints. Exact antipodes
//! have a zero sum, so a fixed perpendicular is chosen instead, which keeps
//! bisection total and deterministic for every input pair.

use nightflight_core::geo::Nvec;
use nightflight_core::vector;

/// Bisector used when the arc runs from one pole to the other.
pub const POLAR_BISECTOR: Nvec = [1.0, 0.0, 0.0];

/// Midpoint of the shorter great-circle arc between `a` and `b`.
pub fn midpoint(a: &Nvec, b: &Nvec) -> Nvec {
    let added = vector::add(a, b);
    let magnitude = vector::norm(&added);
    if magnitude == 0.0 {
        antipodal_bisector(a)
    } else {
        vector::div(&added, magnitude)
    }
}

/// Point 90° from `a` used to split an arc between exact antipodes.
///
/// Away from the poles this is `(a_y, -a_x, 0)` normalized, a point on the
/// equator west of `a`. At a pole every meridian qualifies; the Greenwich one is used.
pub fn antipodal_bisector(a: &Nvec) -> Nvec {
    let equatorial = a[0].hypot(a[1]);
    if equatorial == 0.0 {
        return POLAR_BISECTOR;
    }
    [a[1] / equatorial, -a[0] / equatorial, 0.0]
}

/// Points along the great-circle arc from `a` to `b`, endpoints included.
///
/// Depth 0 yields `[a, mid, b]`; each further level bisects both halves again,
/// so the result holds `2^(depth + 1) + 1` points evenly spaced in angle.
pub fn bisect(a: &Nvec, b: &Nvec, depth: u32) -> Vec<Nvec> {
    let mut points = Vec::with_capacity(point_count(depth));
    points.push(*a);
    bisect_into(a, b, depth, &mut points);
    points
}

/// Number of points [`bisect`] returns for `depth`.
pub fn point_count(depth: u32) -> usize {
    (1usize << (depth + 1)) + 1
}

// Appends every point after `a` up to and including `b`.
fn bisect_into(a: &Nvec, b: &Nvec, depth: u32, out: &mut Vec<Nvec>) {
    let mid = midpoint(a, b);
    if depth > 0 {
        bisect_into(a, &mid, depth - 1, out);
        bisect_into(&mid, b, depth - 1, out);
    } else {
        out.push(mid);
        out.push(*b);
    }
}
