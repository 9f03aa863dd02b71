// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Snap: pull a pointer-driven vertex onto nearby geometry.
//!
//! The host offers candidate geometries as [`SnapLayer`]s (points, polylines,
//! polygons). For a pointer position the engine:
//!
//! 1. Computes each layer's closest approach ([`SnapLayer::closest_approach`]):
//!    the point itself for point-like layers, otherwise the closest point on
//!    the closest segment (polygons include their closing segment; only the
//!    outer ring counts).
//! 2. Picks the closest layer overall ([`closest_layer`]).
//! 3. Applies the vertex priority rule ([`prioritize_vertex`]): an existing
//!    vertex within tolerance of the closest point wins over that point.
//! 4. Snaps only if the closest layer is strictly within tolerance.
//!
//! All distances are measured in projected pixel space via a
//! [`waymark_geom::Projection`]. [`Snapper`] wraps the steps and remembers
//! the last snap so that [`SnapEvent`]s fire only on change.
//!
//! ## Minimal example
//!
//! ```rust
//! use waymark_geom::{GeoPoint, Planar};
//! use waymark_snap::{SnapLayer, Snapper};
//!
//! let proj = Planar::default();
//! // A horizontal segment from x = 0 to x = 10 (GeoPoint takes lat, lng).
//! let layers = [SnapLayer::polyline("road", vec![
//!     GeoPoint::new(0.0, 0.0),
//!     GeoPoint::new(0.0, 10.0),
//! ])];
//!
//! let mut snapper = Snapper::new();
//! let out = snapper.snap(&layers, GeoPoint::new(0.0, 1.0), 5.0, &proj);
//!
//! // The closest point is (1, 0), but the endpoint at the origin is within
//! // tolerance of it and takes priority.
//! assert!(out.snapped);
//! assert_eq!(out.position, GeoPoint::new(0.0, 0.0));
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

mod engine;
mod layer;

pub use engine::{
    FALLBACK_SNAP_DISTANCE, SnapEvent, SnapOptions, SnapOutcome, Snapper, closest_layer,
    prioritize_vertex,
};
pub use layer::{SnapCandidate, SnapGeometry, SnapLayer};
