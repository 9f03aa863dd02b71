// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape-kind rules shared by drawing and editing.

use alloc::vec;

use kurbo::Point;
use waymark_geom::intersect::{new_point_intersects, polygon_intersects, polyline_intersects};

use crate::shape::{Ring, Shape};

/// Rules that differ between open and closed shapes.
///
/// Sessions are generic over a `VertexOwner` instead of branching on the shape
/// kind everywhere. [`Polyline`] and [`Polygon`] are the two implementations;
/// [`ShapeKind`] picks one at runtime.
pub trait VertexOwner {
    /// Whether the last vertex connects back to the first.
    fn is_closed_ring(&self) -> bool;

    /// Fewest vertices a finished (or edited) ring may have.
    fn min_vertices(&self) -> usize;

    /// Index of the vertex that completes the shape when clicked, given the
    /// number of vertices placed so far.
    fn finish_anchor(&self, len: usize) -> Option<usize>;

    /// Whether a projected outline crosses itself under this kind's closure rule.
    fn self_intersects(&self, points: &[Point]) -> bool {
        if self.is_closed_ring() {
            polygon_intersects(points)
        } else {
            polyline_intersects(points)
        }
    }

    /// Whether appending `new_point` to a partially drawn outline would make it
    /// cross itself. The closing segment is not considered.
    fn new_point_intersects(&self, points: &[Point], new_point: Point) -> bool {
        new_point_intersects(points, new_point)
    }

    /// Wrap the placed vertices into the shape handed to the host.
    fn on_complete(&self, ring: Ring) -> Shape;
}

/// Open chain of vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Polyline;

/// Closed ring of vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Polygon;

impl VertexOwner for Polyline {
    fn is_closed_ring(&self) -> bool {
        false
    }

    fn min_vertices(&self) -> usize {
        2
    }

    fn finish_anchor(&self, len: usize) -> Option<usize> {
        // Only the newest vertex finishes a polyline, and only once there is a segment.
        (len > 1).then(|| len - 1)
    }

    fn on_complete(&self, ring: Ring) -> Shape {
        Shape::Flat(ring)
    }
}

impl VertexOwner for Polygon {
    fn is_closed_ring(&self) -> bool {
        true
    }

    fn min_vertices(&self) -> usize {
        3
    }

    fn finish_anchor(&self, len: usize) -> Option<usize> {
        (len > 0).then_some(0)
    }

    fn on_complete(&self, ring: Ring) -> Shape {
        Shape::Nested(vec![ring])
    }
}

/// Runtime choice between [`Polyline`] and [`Polygon`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    /// See [`Polyline`].
    Polyline,
    /// See [`Polygon`].
    Polygon,
}

impl ShapeKind {
    fn owner(self) -> &'static dyn VertexOwner {
        match self {
            Self::Polyline => &Polyline,
            Self::Polygon => &Polygon,
        }
    }
}

impl VertexOwner for ShapeKind {
    fn is_closed_ring(&self) -> bool {
        self.owner().is_closed_ring()
    }

    fn min_vertices(&self) -> usize {
        self.owner().min_vertices()
    }

    fn finish_anchor(&self, len: usize) -> Option<usize> {
        self.owner().finish_anchor(len)
    }

    fn on_complete(&self, ring: Ring) -> Shape {
        self.owner().on_complete(ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_geom::GeoPoint;

    #[test]
    fn minimums() {
        assert_eq!(Polyline.min_vertices(), 2);
        assert_eq!(Polygon.min_vertices(), 3);
        assert_eq!(ShapeKind::Polygon.min_vertices(), 3);
    }

    #[test]
    fn finish_anchor_moves_with_polyline_tail() {
        assert_eq!(Polyline.finish_anchor(1), None);
        assert_eq!(Polyline.finish_anchor(2), Some(1));
        assert_eq!(Polyline.finish_anchor(5), Some(4));
        assert_eq!(Polygon.finish_anchor(0), None);
        assert_eq!(Polygon.finish_anchor(5), Some(0));
    }

    #[test]
    fn closure_rule_affects_intersection() {
        let z = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ];
        assert!(!ShapeKind::Polyline.self_intersects(&z));
        assert!(ShapeKind::Polygon.self_intersects(&z));
    }

    #[test]
    fn completion_wraps_polygons_in_rings() {
        let ring = vec![GeoPoint::new(0.0, 0.0)];
        assert!(Polyline.on_complete(ring.clone()).is_flat());
        assert_eq!(Polygon.on_complete(ring.clone()), Shape::Nested(vec![ring]));
    }
}
