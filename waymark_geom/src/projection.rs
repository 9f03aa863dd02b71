// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geographic points and the projection seam between geographic and plane space.

use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// Mean earth radius in metres used by the default great-circle [`Projection::distance`].
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Latitude limit of the square spherical mercator world, in degrees.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_8;

/// Radius of the spherical mercator sphere, in metres.
const MERCATOR_RADIUS: f64 = 6_378_137.0;

/// A position in geographic space, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude.
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Conversion between geographic coordinates and a 2D plane.
///
/// The plane is usually the map's pixel space at the current zoom, which is
/// what pixel tolerances (snap distance, click jitter) are measured in.
/// Implementations must be deterministic for the lifetime of one interaction:
/// sessions project and unproject the same point several times per event.
pub trait Projection {
    /// Project a geographic point into the plane.
    fn project(&self, point: GeoPoint) -> Point;

    /// Map a plane point back to geographic coordinates.
    fn unproject(&self, point: Point) -> GeoPoint;

    /// Real-world distance between two geographic points.
    ///
    /// Used for running length measurements. The default is the haversine
    /// great-circle distance in metres on a sphere of radius [`EARTH_RADIUS`].
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        let rad = PI / 180.0;
        let lat1 = a.lat * rad;
        let lat2 = b.lat * rad;
        let sin_dlat = ((b.lat - a.lat) * rad / 2.0).sin();
        let sin_dlng = ((b.lng - a.lng) * rad / 2.0).sin();
        let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        EARTH_RADIUS * c
    }
}

/// Spherical mercator projection into a `256 * 2^zoom` pixel world.
///
/// The origin is the top-left corner of the world (longitude -180, latitude
/// [`MAX_MERCATOR_LATITUDE`]); y grows southwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WebMercator {
    /// Zoom level; fractional zooms are allowed.
    pub zoom: f64,
}

impl WebMercator {
    /// Create a projection at the given zoom level.
    pub const fn new(zoom: f64) -> Self {
        Self { zoom }
    }

    fn world_size(&self) -> f64 {
        256.0 * (self.zoom * core::f64::consts::LN_2).exp()
    }
}

impl Projection for WebMercator {
    fn project(&self, point: GeoPoint) -> Point {
        let rad = PI / 180.0;
        let lat = point.lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
        let sin = (lat * rad).sin();
        let x = MERCATOR_RADIUS * point.lng * rad;
        let y = MERCATOR_RADIUS * ((1.0 + sin) / (1.0 - sin)).ln() / 2.0;

        let scale = 0.5 / (PI * MERCATOR_RADIUS);
        let size = self.world_size();
        Point::new(size * (scale * x + 0.5), size * (-scale * y + 0.5))
    }

    fn unproject(&self, point: Point) -> GeoPoint {
        let rad = PI / 180.0;
        let scale = 0.5 / (PI * MERCATOR_RADIUS);
        let size = self.world_size();
        let x = (point.x / size - 0.5) / scale;
        let y = (point.y / size - 0.5) / -scale;
        GeoPoint {
            lat: (2.0 * (y / MERCATOR_RADIUS).exp().atan() - PI / 2.0) / rad,
            lng: x / MERCATOR_RADIUS / rad,
        }
    }
}

/// Flat projection treating longitude as x and latitude as y.
///
/// Distances are Euclidean in coordinate units, which makes this the natural
/// choice for non-geographic maps (floor plans, images) and for tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Planar {
    /// Plane units per coordinate unit.
    pub scale: f64,
}

impl Default for Planar {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Projection for Planar {
    fn project(&self, point: GeoPoint) -> Point {
        Point::new(point.lng * self.scale, point.lat * self.scale)
    }

    fn unproject(&self, point: Point) -> GeoPoint {
        GeoPoint {
            lat: point.y / self.scale,
            lng: point.x / self.scale,
        }
    }

    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        (b.lng - a.lng).hypot(b.lat - a.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn mercator_origin_is_world_center() {
        let proj = WebMercator::new(0.0);
        let p = proj.project(GeoPoint::new(0.0, 0.0));
        assert!((p.x - 128.0).abs() < EPSILON, "x was {}", p.x);
        assert!((p.y - 128.0).abs() < EPSILON, "y was {}", p.y);
    }

    #[test]
    fn mercator_round_trips_within_clamp() {
        let proj = WebMercator::new(13.0);
        let g = GeoPoint::new(47.497_9, 19.040_2);
        let back = proj.unproject(proj.project(g));
        assert!((back.lat - g.lat).abs() < 1e-9);
        assert!((back.lng - g.lng).abs() < 1e-9);
    }

    #[test]
    fn mercator_clamps_poles() {
        let proj = WebMercator::new(0.0);
        let north = proj.project(GeoPoint::new(90.0, 0.0));
        let edge = proj.project(GeoPoint::new(MAX_MERCATOR_LATITUDE, 0.0));
        assert_eq!(north, edge);
        assert!(edge.y.abs() < 1e-6, "top edge of the world should be y = 0");
    }

    #[test]
    fn zoom_doubles_pixel_distances() {
        let a = GeoPoint::new(10.0, 10.0);
        let b = GeoPoint::new(10.0, 11.0);
        let z3 = WebMercator::new(3.0);
        let z4 = WebMercator::new(4.0);
        let d3 = z3.project(a).distance(z3.project(b));
        let d4 = z4.project(a).distance(z4.project(b));
        assert!((d4 - 2.0 * d3).abs() < 1e-9);
    }

    #[test]
    fn haversine_one_degree_on_equator() {
        let d = WebMercator::new(0.0).distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        // 2 * pi * R / 360
        assert!((d - 111_194.926_644_558_7).abs() < 1e-3, "distance was {d}");
    }

    #[test]
    fn planar_is_euclidean() {
        let proj = Planar { scale: 2.0 };
        let p = proj.project(GeoPoint::new(3.0, 4.0));
        assert_eq!(p, Point::new(8.0, 6.0));
        assert_eq!(proj.unproject(p), GeoPoint::new(3.0, 4.0));
        assert_eq!(proj.distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(3.0, 4.0)), 5.0);
    }
}
