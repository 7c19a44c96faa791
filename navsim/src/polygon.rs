//! Planar polygon operations backing the overlap metric and the oracle
//! target search: convex hulls, shoelace areas, convex clipping.
//!
//! All functions operate on (lat, lon) vectors in degrees.

use na::Vector2;
use ordered_float::OrderedFloat;

type Pt = Vector2<f64>;

/// Cross product z-component of (a - o) x (b - o).
fn cross(o: Pt, a: Pt, b: Pt) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Signed shoelace area; positive for counter-clockwise polygons.
pub fn signed_area(poly: &[Pt]) -> f64 {
    if poly.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..poly.len() {
        let p = poly[i];
        let q = poly[(i + 1) % poly.len()];
        acc += p.x * q.y - q.x * p.y;
    }
    acc / 2.0
}

pub fn area(poly: &[Pt]) -> f64 {
    signed_area(poly).abs()
}

/// Reverses the vertex order if the polygon is clockwise.
pub fn oriented_ccw(mut poly: Vec<Pt>) -> Vec<Pt> {
    if signed_area(&poly) < 0.0 {
        poly.reverse();
    }
    poly
}

/// Convex hull by monotone chain, counter-clockwise. Collinear input
/// collapses to fewer than three vertices.
pub fn convex_hull(points: &[Pt]) -> Vec<Pt> {
    let mut pts: Vec<Pt> = points.to_vec();
    pts.sort_by_key(|p| (OrderedFloat(p.x), OrderedFloat(p.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let mut hull: Vec<Pt> = Vec::with_capacity(pts.len() * 2);
    for &p in pts.iter() {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

fn segment_intersection(a: Pt, b: Pt, p: Pt, q: Pt) -> Option<Pt> {
    let r = b - a;
    let s = q - p;
    let denom = r.x * s.y - r.y * s.x;
    if denom == 0.0 {
        return None;
    }
    let t = ((p - a).x * s.y - (p - a).y * s.x) / denom;
    Some(a + r * t)
}

/// Sutherland-Hodgman clip of `subject` against a convex
/// counter-clockwise `clip` polygon.
pub fn clip_polygon(subject: &[Pt], clip: &[Pt]) -> Vec<Pt> {
    let mut output = subject.to_vec();
    for i in 0..clip.len() {
        let a = clip[i];
        let b = clip[(i + 1) % clip.len()];
        let input = std::mem::take(&mut output);
        if input.is_empty() {
            break;
        }
        for j in 0..input.len() {
            let p = input[j];
            let q = input[(j + 1) % input.len()];
            let p_inside = cross(a, b, p) >= 0.0;
            let q_inside = cross(a, b, q) >= 0.0;
            if p_inside {
                output.push(p);
            }
            if p_inside != q_inside {
                if let Some(x) = segment_intersection(a, b, p, q) {
                    output.push(x);
                }
            }
        }
    }
    output
}

/// Clips the segment `a`->`b` to a convex counter-clockwise polygon,
/// returning the surviving sub-segment's endpoints.
pub fn clip_segment(poly: &[Pt], a: Pt, b: Pt) -> Option<(Pt, Pt)> {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for i in 0..poly.len() {
        let v = poly[i];
        let w = poly[(i + 1) % poly.len()];
        let edge = w - v;
        // inward normal for a counter-clockwise polygon
        let n = Vector2::new(-edge.y, edge.x);
        let denom = n.dot(&d);
        if denom == 0.0 {
            // parallel to this edge: reject outright if outside it
            if n.dot(&(a - v)) < 0.0 {
                return None;
            }
        } else {
            let t = n.dot(&(v - a)) / denom;
            if denom > 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }
    }
    Some((a + d * t0, a + d * t1))
}

/// All intersection endpoints of a polyline with a convex
/// counter-clockwise polygon: for every polyline segment that crosses
/// the polygon, both endpoints of the clipped sub-segment.
pub fn polyline_intersections(poly: &[Pt], polyline: &[Pt]) -> Vec<Pt> {
    let mut pts = Vec::new();
    for seg in polyline.windows(2) {
        if let Some((p, q)) = clip_segment(poly, seg[0], seg[1]) {
            pts.push(p);
            if (q - p).norm() > 0.0 {
                pts.push(q);
            }
        }
    }
    pts
}

/// The hull-ratio overlap between two quadrilaterals: intersection area
/// of their convex hulls over the area of the convex hull of the
/// *combined* vertex set.
///
/// The denominator is deliberately the combined hull, not the set
/// union, so this is not a textbook IoU; the training signal was
/// produced with this metric and it must be preserved bit-for-bit in
/// meaning. Disjoint inputs score 0, identical inputs score 1.
pub fn hull_overlap(a: &[Pt], b: &[Pt]) -> f64 {
    let hull_a = convex_hull(a);
    let hull_b = convex_hull(b);
    if hull_a.len() < 3 || hull_b.len() < 3 {
        return 0.0;
    }

    let inter_area = area(&clip_polygon(&hull_a, &hull_b));
    if inter_area <= 0.0 {
        return 0.0;
    }

    let combined: Vec<Pt> = a.iter().chain(b.iter()).copied().collect();
    let denom = area(&convex_hull(&combined));
    if denom == 0.0 {
        0.0
    } else {
        inter_area / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(cx: f64, cy: f64, half: f64) -> Vec<Pt> {
        vec![
            Vector2::new(cx - half, cy - half),
            Vector2::new(cx + half, cy - half),
            Vector2::new(cx + half, cy + half),
            Vector2::new(cx - half, cy + half),
        ]
    }

    #[test]
    fn hull_of_square_with_interior_point() {
        let mut pts = square(0.0, 0.0, 1.0);
        pts.push(Vector2::new(0.2, 0.1));
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert_relative_eq!(area(&hull), 4.0);
        assert!(signed_area(&hull) > 0.0);
    }

    #[test]
    fn clip_fully_contained() {
        let outer = square(0.0, 0.0, 2.0);
        let inner = square(0.0, 0.0, 1.0);
        let clipped = clip_polygon(&inner, &outer);
        assert_relative_eq!(area(&clipped), 4.0);
    }

    #[test]
    fn clip_partial_overlap() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.0, 0.0, 1.0);
        // overlap is a 1x2 strip
        assert_relative_eq!(area(&clip_polygon(&a, &b)), 2.0);
    }

    #[test]
    fn overlap_identical_is_one() {
        let a = square(3.0, -2.0, 0.5);
        assert_relative_eq!(hull_overlap(&a, &a), 1.0);
    }

    #[test]
    fn overlap_disjoint_is_zero() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(10.0, 0.0, 1.0);
        assert_relative_eq!(hull_overlap(&a, &b), 0.0);
    }

    #[test]
    fn overlap_decreases_as_squares_separate() {
        let a = square(0.0, 0.0, 1.0);
        let mut last = f64::MAX;
        for k in 0..4 {
            let b = square(0.4 * k as f64, 0.0, 1.0);
            let overlap = hull_overlap(&a, &b);
            assert!(overlap < last, "overlap must strictly decrease");
            last = overlap;
        }
    }

    #[test]
    fn overlap_denominator_is_combined_hull() {
        // Two unit squares offset diagonally by half a side.
        // Intersection: 0.5 x 0.5 = 0.25. Set-union area would be 1.75,
        // but the combined hull also closes over the two concave
        // corners, giving 2.0. The hull-ratio metric must use the
        // latter (0.125), not the IoU value (~0.1429).
        let a = square(0.5, 0.5, 0.5);
        let b = square(1.0, 1.0, 0.5);
        let overlap = hull_overlap(&a, &b);
        assert_relative_eq!(overlap, 0.25 / 2.0, max_relative = 1e-12);
    }

    #[test]
    fn segment_clipping() {
        let poly = square(0.0, 0.0, 1.0);
        let (p, q) = clip_segment(&poly, Vector2::new(-5.0, 0.0), Vector2::new(5.0, 0.0)).unwrap();
        assert_relative_eq!(p.x, -1.0);
        assert_relative_eq!(q.x, 1.0);

        assert!(clip_segment(&poly, Vector2::new(-5.0, 3.0), Vector2::new(5.0, 3.0)).is_none());
    }

    #[test]
    fn polyline_interior_endpoints_survive() {
        let poly = square(0.0, 0.0, 1.0);
        let line = [
            Vector2::new(0.0, 0.0),
            Vector2::new(0.5, 0.0),
            Vector2::new(5.0, 0.0),
        ];
        let pts = polyline_intersections(&poly, &line);
        // both segments intersect; the exit point lands on the boundary
        assert!(pts.iter().any(|p| (p.x - 1.0).abs() < 1e-12));
        assert!(pts.iter().any(|p| p.x == 0.0));
    }
}
