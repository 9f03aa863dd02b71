// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Chain: the vertex model behind interactive polyline and polygon editing.
//!
//! A [`Chain`] is an arena of entries addressed by generational [`VertexId`]s.
//! Real vertices are kept in per-ring order and linked to their neighbours;
//! closed rings link the last vertex back to the first. Between each pair of
//! adjacent vertices sits a *middle marker*, a handle the user can drag (or
//! click) to insert a new vertex at that point.
//!
//! - [`Shape`] is the plain coordinate form (one ring or nested rings) that
//!   crosses the host boundary and is stored in undo/redo snapshots.
//! - [`VertexOwner`] captures the rules that differ between open and closed
//!   shapes: minimum vertex counts, which vertex finishes a drawing, and how
//!   self-intersection is checked. [`Polyline`], [`Polygon`] and the runtime
//!   [`ShapeKind`] implement it.
//!
//! ## Minimal example
//!
//! ```rust
//! use waymark_chain::{Chain, Shape, VertexKind};
//! use waymark_geom::{GeoPoint, Planar};
//!
//! let proj = Planar::default();
//! let shape = Shape::Flat(vec![
//!     GeoPoint::new(0.0, 0.0),
//!     GeoPoint::new(0.0, 10.0),
//!     GeoPoint::new(0.0, 20.0),
//! ]);
//! let mut chain = Chain::from_shape(&shape, false, &proj);
//! assert_eq!(chain.middle_markers().count(), 2);
//!
//! // Promote the marker between the first two vertices.
//! let second = chain.vertex_at(0, 1).unwrap();
//! let marker = chain.vertex(second).unwrap().middle_left().unwrap();
//! assert!(matches!(chain.vertex(marker).unwrap().kind(), VertexKind::Middle { .. }));
//! assert_eq!(chain.promote_middle_marker(marker, &proj), Some(1));
//!
//! assert_eq!(chain.ring_len(0), 4);
//! assert_eq!(chain.positions(0)[1], GeoPoint::new(0.0, 5.0));
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

mod chain;
mod owner;
mod shape;

pub use chain::{Chain, Vertex, VertexId, VertexKind};
pub use owner::{Polygon, Polyline, ShapeKind, VertexOwner};
pub use shape::{Ring, Shape};
