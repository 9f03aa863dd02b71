// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Geom: projected-plane geometry for interactive map vertex editing.
//!
//! Map shapes are stored as geographic coordinates ([`GeoPoint`]) but every
//! interactive decision (how far the pointer is from a segment, whether a new
//! vertex makes the outline cross itself, where a segment's midpoint sits on
//! screen) is made in a flat 2D plane. A host-provided [`Projection`] maps
//! between the two; this crate supplies the pure functions that run in the
//! plane.
//!
//! - [`distance`], [`closest_point_on_segment`], [`distance_to_segment`]:
//!   point and segment queries in projected space. Zero-length segments are
//!   allowed and behave like a single point.
//! - [`midpoint`]: midpoint of two geographic points computed in projected
//!   space and unprojected again, so it lands on the visual midpoint under a
//!   non-linear projection.
//! - The [`intersect`] module: segment crossing tests and whole-outline
//!   self-intersection checks for open and closed rings.
//! - The [`measure`] module: human-readable path lengths in metric or
//!   imperial units.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use waymark_geom::{closest_point_on_segment, distance_to_segment};
//!
//! let a = Point::new(0.0, 0.0);
//! let b = Point::new(10.0, 0.0);
//!
//! // Projection lands inside the segment.
//! assert_eq!(closest_point_on_segment(Point::new(4.0, 3.0), a, b), Point::new(4.0, 0.0));
//! // Projection past `b` is clamped to `b`.
//! assert_eq!(closest_point_on_segment(Point::new(14.0, 3.0), a, b), b);
//! assert_eq!(distance_to_segment(Point::new(4.0, 3.0), a, b), 3.0);
//! ```
//!
//! ## Projections
//!
//! [`WebMercator`] reproduces the spherical mercator pixel space common to slippy
//! maps; [`Planar`] treats longitude/latitude as plain Cartesian coordinates,
//! which suits flat (non-geographic) maps and tests.
//!
//! ```rust
//! use waymark_geom::{GeoPoint, Planar, Projection, midpoint};
//!
//! let proj = Planar::default();
//! let m = midpoint(&proj, GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 20.0));
//! assert_eq!(m, GeoPoint::new(5.0, 10.0));
//! assert_eq!(proj.distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(3.0, 4.0)), 5.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod intersect;
pub mod measure;
mod projection;
mod segment;

pub use projection::{EARTH_RADIUS, GeoPoint, MAX_MERCATOR_LATITUDE, Planar, Projection, WebMercator};
pub use segment::{closest_point_on_segment, distance, distance_to_segment, midpoint};
