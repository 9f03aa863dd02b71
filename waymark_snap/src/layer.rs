// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap targets supplied by the host and their closest approach to a pointer.

use alloc::vec::Vec;
use core::slice;

use kurbo::Point;
use waymark_geom::{GeoPoint, Projection, closest_point_on_segment, distance_to_segment};

/// Coordinates of a host geometry that can be snapped to.
#[derive(Clone, Debug, PartialEq)]
pub enum SnapGeometry {
    /// A marker or circle marker.
    Point(GeoPoint),
    /// An open coordinate sequence.
    Polyline(Vec<GeoPoint>),
    /// Polygon rings. Only the first (outer) ring is snapped to.
    Polygon(Vec<Vec<GeoPoint>>),
}

impl SnapGeometry {
    /// Coordinates considered for snapping and whether they close into a ring.
    fn outline(&self) -> (&[GeoPoint], bool) {
        match self {
            Self::Point(p) => (slice::from_ref(p), false),
            Self::Polyline(coords) => (coords, false),
            Self::Polygon(rings) => (rings.first().map(Vec::as_slice).unwrap_or_default(), true),
        }
    }
}

/// A host geometry offered as a snap target, tagged with the host's handle `K`.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapLayer<K> {
    /// Host handle, echoed back in candidates and snap events.
    pub id: K,
    /// Coordinates to snap to.
    pub geometry: SnapGeometry,
}

impl<K> SnapLayer<K> {
    /// A point target.
    pub fn point(id: K, at: GeoPoint) -> Self {
        Self {
            id,
            geometry: SnapGeometry::Point(at),
        }
    }

    /// An open polyline target.
    pub fn polyline(id: K, coords: Vec<GeoPoint>) -> Self {
        Self {
            id,
            geometry: SnapGeometry::Polyline(coords),
        }
    }

    /// A polygon target.
    pub fn polygon(id: K, rings: Vec<Vec<GeoPoint>>) -> Self {
        Self {
            id,
            geometry: SnapGeometry::Polygon(rings),
        }
    }
}

/// Closest approach of one layer to the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapCandidate<K> {
    /// Layer the candidate was computed from.
    pub layer: K,
    /// Endpoints of the closest segment; `None` for point-like layers.
    pub segment: Option<[GeoPoint; 2]>,
    /// Closest point on the layer.
    pub latlng: GeoPoint,
    /// Pixel distance from the pointer to `latlng`.
    pub distance: f64,
}

impl<K: Copy> SnapLayer<K> {
    /// Compute this layer's closest approach to `pointer` in projected space.
    ///
    /// A single coordinate is treated as a point. Every consecutive pair is a
    /// segment, plus the closing pair for polygons; on equal distances the
    /// earlier segment is kept. Layers without coordinates yield `None`.
    pub fn closest_approach<P: Projection + ?Sized>(
        &self,
        pointer: GeoPoint,
        projection: &P,
    ) -> Option<SnapCandidate<K>> {
        let (coords, closed) = self.geometry.outline();
        let p = projection.project(pointer);
        match coords {
            [] => None,
            [only] => Some(SnapCandidate {
                layer: self.id,
                segment: None,
                latlng: *only,
                distance: projection.project(*only).distance(p),
            }),
            _ => {
                let projected: Vec<Point> = coords.iter().map(|c| projection.project(*c)).collect();
                let n = projected.len();
                let pairs = if closed { n } else { n - 1 };

                let mut best: Option<(usize, f64)> = None;
                for i in 0..pairs {
                    let d = distance_to_segment(p, projected[i], projected[(i + 1) % n]);
                    if best.is_none_or(|(_, shortest)| d < shortest) {
                        best = Some((i, d));
                    }
                }
                let (i, distance) = best?;
                let j = (i + 1) % n;
                let closest = closest_point_on_segment(p, projected[i], projected[j]);
                Some(SnapCandidate {
                    layer: self.id,
                    segment: Some([coords[i], coords[j]]),
                    latlng: projection.unproject(closest),
                    distance,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use waymark_geom::Planar;

    fn gp(x: f64, y: f64) -> GeoPoint {
        GeoPoint::new(y, x)
    }

    #[test]
    fn empty_layers_have_no_candidate() {
        let proj = Planar::default();
        assert!(SnapLayer::polyline(1, vec![]).closest_approach(gp(0.0, 0.0), &proj).is_none());
        assert!(SnapLayer::polygon(2, vec![]).closest_approach(gp(0.0, 0.0), &proj).is_none());
    }

    #[test]
    fn point_layer_has_no_segment() {
        let proj = Planar::default();
        let c = SnapLayer::point(7, gp(3.0, 4.0))
            .closest_approach(gp(0.0, 0.0), &proj)
            .expect("point candidate");
        assert_eq!(c.segment, None);
        assert_eq!(c.latlng, gp(3.0, 4.0));
        assert_eq!(c.distance, 5.0);
        assert_eq!(c.layer, 7);
    }

    #[test]
    fn single_coordinate_line_is_point_like() {
        let proj = Planar::default();
        let c = SnapLayer::polyline(0, vec![gp(1.0, 1.0)])
            .closest_approach(gp(1.0, 2.0), &proj)
            .expect("candidate");
        assert_eq!(c.segment, None);
        assert_eq!(c.distance, 1.0);
    }

    #[test]
    fn polygon_closing_segment_is_considered() {
        let proj = Planar::default();
        let square = vec![vec![gp(0.0, 0.0), gp(10.0, 0.0), gp(10.0, 10.0), gp(0.0, 10.0)]];
        let pointer = gp(-1.0, 5.0);

        let c = SnapLayer::polygon(0, square.clone())
            .closest_approach(pointer, &proj)
            .expect("candidate");
        assert_eq!(c.segment, Some([gp(0.0, 10.0), gp(0.0, 0.0)]));
        assert_eq!(c.latlng, gp(0.0, 5.0));
        assert_eq!(c.distance, 1.0);

        // The same coordinates as an open line lack that segment.
        let open = SnapLayer::polyline(0, square[0].clone())
            .closest_approach(pointer, &proj)
            .expect("candidate");
        assert!(open.distance > 1.0);
    }

    #[test]
    fn polygon_holes_are_ignored() {
        let proj = Planar::default();
        let rings = vec![
            vec![gp(0.0, 0.0), gp(100.0, 0.0), gp(100.0, 100.0), gp(0.0, 100.0)],
            vec![gp(40.0, 40.0), gp(60.0, 40.0), gp(60.0, 60.0)],
        ];
        let c = SnapLayer::polygon(0, rings)
            .closest_approach(gp(50.0, 45.0), &proj)
            .expect("candidate");
        assert_eq!(c.distance, 45.0);
    }
}
