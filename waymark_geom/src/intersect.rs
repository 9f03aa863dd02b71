// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Self-intersection tests for vertex outlines in projected space.
//!
//! Outlines are slices of plane points in drawing order. Adjacent segments
//! share an endpoint and are never reported as crossing each other; only
//! non-adjacent segments are compared. An outline needs at least four points
//! (three segments) before it can cross itself.
//!
//! ```rust
//! use kurbo::Point;
//! use waymark_geom::intersect::{new_point_intersects, polyline_intersects};
//!
//! // A "Z" never crosses itself.
//! let z = [
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(0.0, 10.0),
//!     Point::new(10.0, 10.0),
//! ];
//! assert!(!polyline_intersects(&z));
//!
//! // Heading back below the start cuts through the diagonal.
//! assert!(new_point_intersects(&z, Point::new(0.0, -5.0)));
//! ```

use kurbo::Point;

/// Strict counter-clockwise orientation predicate for the triangle `p, p1, p2`.
#[inline]
fn counter_clockwise(p: Point, p1: Point, p2: Point) -> bool {
    (p2.y - p.y) * (p1.x - p.x) > (p1.y - p.y) * (p2.x - p.x)
}

/// Whether segment `[p, p1]` crosses segment `[p2, p3]`.
///
/// Each segment's endpoints must lie strictly on opposite sides of the other
/// segment's line; collinear overlaps are not reported.
#[inline]
pub fn segments_intersect(p: Point, p1: Point, p2: Point, p3: Point) -> bool {
    counter_clockwise(p, p2, p3) != counter_clockwise(p1, p2, p3)
        && counter_clockwise(p, p1, p2) != counter_clockwise(p, p1, p3)
}

/// Test `[p, p1]` against the outline segments ending at indices
/// `min_index + 1 ..= max_index`, newest first.
fn intersects_range(points: &[Point], p: Point, p1: Point, max_index: usize, min_index: usize) -> bool {
    let max_index = max_index.min(points.len().saturating_sub(1));
    if max_index <= min_index {
        return false;
    }
    (min_index + 1..=max_index)
        .rev()
        .any(|j| segments_intersect(p, p1, points[j - 1], points[j]))
}

#[inline]
fn too_few_points(len: usize) -> bool {
    len <= 3
}

/// Whether an open outline crosses itself.
pub fn polyline_intersects(points: &[Point]) -> bool {
    let len = points.len();
    if too_few_points(len) {
        return false;
    }
    (3..len)
        .rev()
        .any(|i| intersects_range(points, points[i - 1], points[i], i - 2, 0))
}

/// Whether a closed outline crosses itself, including its closing segment.
pub fn polygon_intersects(points: &[Point]) -> bool {
    let len = points.len();
    if too_few_points(len) {
        return false;
    }
    if polyline_intersects(points) {
        return true;
    }
    // The closing segment touches both the first and the last segment.
    intersects_range(points, points[len - 1], points[0], len - 2, 1)
}

/// Whether appending `new_point` to an open outline would make it cross itself.
///
/// Only the new segment from the current last point to `new_point` is tested;
/// the existing outline is assumed valid.
pub fn new_point_intersects(points: &[Point], new_point: Point) -> bool {
    let len = points.len();
    if too_few_points(len + 1) {
        return false;
    }
    intersects_range(points, points[len - 1], new_point, len - 2, 0)
}
