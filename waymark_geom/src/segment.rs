// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point and segment queries in projected space.

use kurbo::Point;

use crate::projection::{GeoPoint, Projection};

/// Euclidean distance between two plane points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Closest point to `p` on the segment `[a, b]`.
///
/// This is the orthogonal projection of `p` onto the segment's line, clamped
/// to the endpoints when the segment parameter falls outside `[0, 1]`. A
/// zero-length segment returns `a`.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let v = b - a;
    let len2 = v.hypot2();
    if len2 <= 0.0 {
        return a;
    }
    let t = ((p - a).dot(v) / len2).clamp(0.0, 1.0);
    a + v * t
}

/// Distance from `p` to the segment `[a, b]`.
///
/// Equivalent to `distance(p, closest_point_on_segment(p, a, b))`; for a
/// zero-length segment this is the distance to `a`.
#[inline]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    distance(p, closest_point_on_segment(p, a, b))
}

/// Midpoint of two geographic points, taken in projected space.
///
/// A naive latitude/longitude average drifts away from the drawn segment under
/// mercator-like projections; averaging the projected points keeps the
/// midpoint on the segment the user actually sees.
pub fn midpoint<P: Projection + ?Sized>(projection: &P, a: GeoPoint, b: GeoPoint) -> GeoPoint {
    let pa = projection.project(a);
    let pb = projection.project(b);
    projection.unproject(pa.midpoint(pb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{Planar, WebMercator};

    #[test]
    fn projection_inside_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 10.0);
        let c = closest_point_on_segment(Point::new(10.0, 0.0), a, b);
        assert!((c.x - 5.0).abs() < 1e-12 && (c.y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn projection_clamped_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(closest_point_on_segment(Point::new(-5.0, 2.0), a, b), a);
        assert_eq!(closest_point_on_segment(Point::new(15.0, 2.0), a, b), b);
    }

    #[test]
    fn zero_length_segment_behaves_like_point() {
        let a = Point::new(3.0, 3.0);
        let p = Point::new(6.0, 7.0);
        assert_eq!(closest_point_on_segment(p, a, a), a);
        assert_eq!(distance_to_segment(p, a, a), distance(p, a));
        assert_eq!(distance_to_segment(a, a, a), 0.0);
    }

    #[test]
    fn segment_distance_never_exceeds_endpoint_distance() {
        let samples = [
            (Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(3.0, 4.0)),
            (Point::new(-2.0, 5.0), Point::new(8.0, -1.0), Point::new(20.0, 20.0)),
            (Point::new(1.0, 1.0), Point::new(1.0, 9.0), Point::new(-4.0, 0.5)),
            (Point::new(2.5, 2.5), Point::new(2.5, 2.5), Point::new(0.0, 0.0)),
        ];
        for (a, b, p) in samples {
            let d = distance_to_segment(p, a, b);
            assert!(d <= distance(p, a) + 1e-12, "{p:?} vs {a:?}");
            assert!(d <= distance(p, b) + 1e-12, "{p:?} vs {b:?}");
        }
    }

    #[test]
    fn planar_midpoint_is_average() {
        let m = midpoint(&Planar::default(), GeoPoint::new(0.0, 0.0), GeoPoint::new(4.0, 8.0));
        assert_eq!(m, GeoPoint::new(2.0, 4.0));
    }

    #[test]
    fn mercator_midpoint_differs_from_naive_average() {
        let proj = WebMercator::new(5.0);
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(70.0, 0.0);
        let m = midpoint(&proj, a, b);
        // Mercator stretches high latitudes, so the visual midpoint sits north of 35 degrees.
        assert!(m.lat > 35.0, "midpoint latitude was {}", m.lat);
        let pm = proj.project(m);
        let expected = proj.project(a).midpoint(proj.project(b));
        assert!(pm.distance(expected) < 1e-6);
    }
}
