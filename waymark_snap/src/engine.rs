// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choosing a snap target across layers and tracking snap state.

use waymark_geom::{GeoPoint, Projection};

use crate::layer::{SnapCandidate, SnapLayer};

/// Pixel tolerance used when [`SnapOptions::distance`] is not positive.
pub const FALLBACK_SNAP_DISTANCE: f64 = 30.0;

/// Snapping configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapOptions {
    /// Whether pointer-driven vertices snap at all.
    pub enabled: bool,
    /// Snap tolerance in pixels.
    pub distance: f64,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            distance: 20.0,
        }
    }
}

impl SnapOptions {
    /// Effective tolerance in pixels.
    pub fn tolerance(&self) -> f64 {
        if self.distance > 0.0 {
            self.distance
        } else {
            FALLBACK_SNAP_DISTANCE
        }
    }
}

/// Closest candidate across all layers.
///
/// Layers are scanned from last to first and a later-scanned layer only wins
/// with a strictly smaller distance, so ties go to the layer listed last.
pub fn closest_layer<K: Copy, P: Projection + ?Sized>(
    layers: &[SnapLayer<K>],
    pointer: GeoPoint,
    projection: &P,
) -> Option<SnapCandidate<K>> {
    let mut closest: Option<SnapCandidate<K>> = None;
    for layer in layers.iter().rev() {
        let Some(candidate) = layer.closest_approach(pointer, projection) else {
            continue;
        };
        if closest.is_none_or(|best| candidate.distance < best.distance) {
            closest = Some(candidate);
        }
    }
    closest
}

/// Apply the vertex priority rule to a candidate.
///
/// For a candidate on a segment `[A, B]` with closest point `C`, the endpoint
/// nearer to `C` replaces `C` when it is within `tolerance` pixels of it.
/// Point-like candidates are returned unchanged.
pub fn prioritize_vertex<K, P: Projection + ?Sized>(
    candidate: &SnapCandidate<K>,
    tolerance: f64,
    projection: &P,
) -> GeoPoint {
    let Some([a, b]) = candidate.segment else {
        return candidate.latlng;
    };
    let c = projection.project(candidate.latlng);
    let ac = projection.project(a).distance(c);
    let bc = projection.project(b).distance(c);
    let (vertex, shortest) = if ac < bc { (a, ac) } else { (b, bc) };
    if shortest < tolerance {
        vertex
    } else {
        candidate.latlng
    }
}

/// Notification that the snap state changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnapEvent<K> {
    /// The pointer snapped to a new coordinate.
    Snapped {
        /// Layer snapped to.
        layer: K,
        /// Coordinate snapped to.
        latlng: GeoPoint,
        /// Segment the coordinate lies on, if any.
        segment: Option<[GeoPoint; 2]>,
    },
    /// A previous snap was released.
    Unsnapped {
        /// Coordinate of the released snap.
        latlng: GeoPoint,
    },
}

/// Result of one snap resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapOutcome<K> {
    /// Where the pointer-driven vertex should go.
    pub position: GeoPoint,
    /// Whether `position` is a snap target rather than the raw pointer.
    pub snapped: bool,
    /// Set when the snap state changed.
    pub event: Option<SnapEvent<K>>,
}

impl<K> SnapOutcome<K> {
    /// The pointer position, unsnapped and without an event.
    pub fn raw(pointer: GeoPoint) -> Self {
        Self {
            position: pointer,
            snapped: false,
            event: None,
        }
    }
}

/// Remembers the last snapped coordinate so changes can be reported once.
#[derive(Clone, Copy, Debug, Default)]
pub struct Snapper {
    last: Option<GeoPoint>,
}

impl Snapper {
    /// Create a snapper with no snap recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// The coordinate of the current snap, if any.
    pub fn last_snap(&self) -> Option<GeoPoint> {
        self.last
    }

    /// Forget the current snap without reporting it.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Resolve `pointer` against `layers`.
    ///
    /// The pointer snaps when the closest layer is strictly closer than
    /// `tolerance` pixels. [`SnapEvent::Snapped`] is reported only when the
    /// target differs from the previously recorded one. Out of range, the
    /// recorded snap is cleared and [`SnapEvent::Unsnapped`] reported if it
    /// differs from the current (out-of-range) target. With no usable layers
    /// the pointer is returned as is and the recorded snap is kept.
    pub fn snap<K: Copy, P: Projection + ?Sized>(
        &mut self,
        layers: &[SnapLayer<K>],
        pointer: GeoPoint,
        tolerance: f64,
        projection: &P,
    ) -> SnapOutcome<K> {
        let Some(candidate) = closest_layer(layers, pointer, projection) else {
            return SnapOutcome::raw(pointer);
        };
        let target = prioritize_vertex(&candidate, tolerance, projection);

        if candidate.distance < tolerance {
            let mut event = None;
            if self.last != Some(target) {
                log::trace!("snapped to {target:?} at {:.1}px", candidate.distance);
                self.last = Some(target);
                event = Some(SnapEvent::Snapped {
                    layer: candidate.layer,
                    latlng: target,
                    segment: candidate.segment,
                });
            }
            SnapOutcome {
                position: target,
                snapped: true,
                event,
            }
        } else {
            let event = self
                .last
                .take()
                .filter(|previous| *previous != target)
                .map(|latlng| SnapEvent::Unsnapped { latlng });
            SnapOutcome {
                position: pointer,
                snapped: false,
                event,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::SnapLayer;
    use alloc::vec;
    use waymark_geom::Planar;

    fn gp(x: f64, y: f64) -> GeoPoint {
        GeoPoint::new(y, x)
    }

    fn segment(id: u32) -> SnapLayer<u32> {
        SnapLayer::polyline(id, vec![gp(0.0, 0.0), gp(10.0, 0.0)])
    }

    #[test]
    fn endpoint_wins_within_tolerance() {
        let proj = Planar::default();
        let mut snapper = Snapper::new();
        let out = snapper.snap(&[segment(1)], gp(1.0, 0.0), 5.0, &proj);
        assert!(out.snapped);
        assert_eq!(out.position, gp(0.0, 0.0));
    }

    #[test]
    fn interior_point_when_endpoints_are_far() {
        let proj = Planar::default();
        let mut snapper = Snapper::new();
        let out = snapper.snap(&[segment(1)], gp(5.0, 2.0), 3.0, &proj);
        assert!(out.snapped);
        assert_eq!(out.position, gp(5.0, 0.0));
        assert_eq!(
            out.event,
            Some(SnapEvent::Snapped {
                layer: 1,
                latlng: gp(5.0, 0.0),
                segment: Some([gp(0.0, 0.0), gp(10.0, 0.0)]),
            })
        );
    }

    #[test]
    fn tolerance_is_strict() {
        let proj = Planar::default();
        let mut snapper = Snapper::new();
        let out = snapper.snap(&[segment(1)], gp(5.0, 3.0), 3.0, &proj);
        assert!(!out.snapped);
        assert_eq!(out.position, gp(5.0, 3.0));
        assert_eq!(out.event, None);
    }

    #[test]
    fn repeated_snap_reports_once() {
        let proj = Planar::default();
        let mut snapper = Snapper::new();
        let layers = [segment(1)];
        let first = snapper.snap(&layers, gp(5.0, 1.0), 3.0, &proj);
        let second = snapper.snap(&layers, gp(5.0, 2.0), 3.0, &proj);
        assert!(first.event.is_some());
        assert!(second.snapped);
        assert_eq!(second.event, None);
        assert_eq!(snapper.last_snap(), Some(gp(5.0, 0.0)));
    }

    #[test]
    fn moving_away_unsnaps() {
        let proj = Planar::default();
        let mut snapper = Snapper::new();
        let layers = [segment(1)];
        snapper.snap(&layers, gp(5.0, 1.0), 3.0, &proj);
        let out = snapper.snap(&layers, gp(6.0, 8.0), 3.0, &proj);
        assert!(!out.snapped);
        assert_eq!(out.event, Some(SnapEvent::Unsnapped { latlng: gp(5.0, 0.0) }));
        assert_eq!(snapper.last_snap(), None);
    }

    #[test]
    fn empty_layers_keep_state() {
        let proj = Planar::default();
        let mut snapper = Snapper::new();
        snapper.snap(&[segment(1)], gp(5.0, 1.0), 3.0, &proj);
        let out = snapper.snap::<u32, _>(&[], gp(50.0, 50.0), 3.0, &proj);
        assert_eq!(out, SnapOutcome::raw(gp(50.0, 50.0)));
        assert_eq!(snapper.last_snap(), Some(gp(5.0, 0.0)));
    }

    #[test]
    fn layers_without_coordinates_are_skipped() {
        let proj = Planar::default();
        let layers = [SnapLayer::polyline(0, vec![]), segment(1)];
        let best = closest_layer(&layers, gp(5.0, 1.0), &proj).expect("one usable layer");
        assert_eq!(best.layer, 1);
    }

    #[test]
    fn closest_layer_wins_and_ties_go_to_last() {
        let proj = Planar::default();
        let near = SnapLayer::point(0, gp(5.0, 1.0));
        let far = SnapLayer::point(1, gp(5.0, 4.0));
        let best = closest_layer(&[near.clone(), far], gp(5.0, 0.0), &proj).expect("candidate");
        assert_eq!(best.layer, 0);

        let twin = SnapLayer::point(2, gp(5.0, -1.0));
        let best = closest_layer(&[near, twin], gp(5.0, 0.0), &proj).expect("candidate");
        assert_eq!(best.layer, 2);
    }

    #[test]
    fn points_skip_priority() {
        let proj = Planar::default();
        let candidate = SnapCandidate {
            layer: 0,
            segment: None,
            latlng: gp(1.0, 1.0),
            distance: 0.5,
        };
        assert_eq!(prioritize_vertex(&candidate, 100.0, &proj), gp(1.0, 1.0));
    }

    #[test]
    fn fallback_tolerance() {
        let opts = SnapOptions {
            enabled: true,
            distance: 0.0,
        };
        assert_eq!(opts.tolerance(), FALLBACK_SNAP_DISTANCE);
        assert_eq!(SnapOptions::default().tolerance(), 20.0);
    }
}
