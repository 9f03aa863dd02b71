// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain coordinate data for shapes: what crosses the host boundary and what
//! history snapshots are made of.

use alloc::vec::Vec;
use core::slice;

use kurbo::{Point, Rect};
use waymark_geom::{GeoPoint, Projection};

/// One ordered sequence of vertex coordinates (a polyline, a polygon
/// boundary, or a polygon hole).
pub type Ring = Vec<GeoPoint>;

/// Coordinate data of a shape.
///
/// Cloning a `Shape` is a deep copy; snapshots taken for undo/redo share
/// nothing with the live shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A single ring (polylines, simple polygons).
    Flat(Ring),
    /// One ring per polygon boundary or hole.
    Nested(Vec<Ring>),
}

impl Default for Shape {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

impl Shape {
    /// Whether this is a single-ring shape.
    pub fn is_flat(&self) -> bool {
        matches!(self, Self::Flat(_))
    }

    /// All rings in order. A flat shape has exactly one.
    pub fn rings(&self) -> &[Ring] {
        match self {
            Self::Flat(ring) => slice::from_ref(ring),
            Self::Nested(rings) => rings,
        }
    }

    /// Mutable access to a ring.
    pub fn ring_mut(&mut self, ring: usize) -> Option<&mut Ring> {
        match self {
            Self::Flat(r) => (ring == 0).then_some(r),
            Self::Nested(rings) => rings.get_mut(ring),
        }
    }

    /// Total number of vertices across all rings.
    pub fn vertex_count(&self) -> usize {
        self.rings().iter().map(Vec::len).sum()
    }

    /// Whether the shape has no vertices at all.
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// Geographic extent as a rect with `x = lng` and `y = lat`.
    ///
    /// Returns `None` for a shape without vertices.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.rings().iter().flatten();
        let first = points.next()?;
        let seed = Rect::from_points(geo_as_point(*first), geo_as_point(*first));
        Some(points.fold(seed, |acc, p| acc.union_pt(geo_as_point(*p))))
    }

    /// Project one ring into the plane.
    pub fn project_ring<P: Projection + ?Sized>(&self, ring: usize, projection: &P) -> Vec<Point> {
        self.rings()
            .get(ring)
            .map(|r| r.iter().map(|p| projection.project(*p)).collect())
            .unwrap_or_default()
    }
}

#[inline]
fn geo_as_point(p: GeoPoint) -> Point {
    Point::new(p.lng, p.lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn flat_shape_has_one_ring() {
        let shape = Shape::Flat(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)]);
        assert!(shape.is_flat());
        assert_eq!(shape.rings().len(), 1);
        assert_eq!(shape.vertex_count(), 2);
    }

    #[test]
    fn bounds_cover_every_ring() {
        let shape = Shape::Nested(vec![
            vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 5.0)],
            vec![GeoPoint::new(-2.0, 7.0)],
        ]);
        assert_eq!(shape.bounds(), Some(Rect::new(0.0, -2.0, 7.0, 10.0)));
        assert_eq!(Shape::default().bounds(), None);
    }

    #[test]
    fn snapshots_are_independent() {
        let mut live = Shape::Flat(vec![GeoPoint::new(1.0, 1.0)]);
        let snapshot = live.clone();
        live.ring_mut(0).expect("flat ring")[0] = GeoPoint::new(9.0, 9.0);
        assert_eq!(snapshot.rings()[0][0], GeoPoint::new(1.0, 1.0));
        assert!(live.ring_mut(1).is_none());
    }
}
