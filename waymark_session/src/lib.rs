// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Session: pointer-driven state machines for drawing and editing
//! polylines and polygons on a map.
//!
//! The host owns the map and its rendering. It feeds pointer and key events
//! into a session together with host timestamps, and reads back events and
//! state to draw markers, guides and the error indicator.
//!
//! - [`DrawSession`] places a new shape vertex by vertex: click jitter and
//!   input cooldown filtering, finishing by clicking the finish anchor,
//!   snapping of the floating vertex, live measurement, intersection checks
//!   and keyboard undo/redo of placed vertices.
//! - [`EditSession`] drags, inserts and removes vertices of an existing shape,
//!   with snapshot undo/redo.
//!
//! Neither session runs timers. Deferred actions (input re-enable, hiding the
//! error indicator) are stored as deadlines and fire from `poll(now)` or from
//! the next event carrying a later timestamp.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use waymark_chain::{Polyline, Shape};
//! use waymark_geom::{GeoPoint, Planar};
//! use waymark_session::{DrawEvent, DrawOptions, DrawSession, PointerEvent, PointerKind};
//!
//! let mut draw: DrawSession<_, _> = DrawSession::new(Polyline, Planar::default(), DrawOptions::default());
//! draw.start();
//!
//! let mut t = 0;
//! for (x, y) in [(0.0, 0.0), (30.0, 0.0), (30.0, 40.0)] {
//!     let at = GeoPoint::new(y, x);
//!     let client = Point::new(x, y);
//!     draw.on_pointer(&PointerEvent::new(PointerKind::Down, client, at, t), &[]);
//!     draw.on_pointer(&PointerEvent::new(PointerKind::Up, client, at, t + 20), &[]);
//!     t += 200;
//! }
//! assert_eq!(draw.measurement(), 70.0);
//!
//! let events = draw.finish(t).unwrap();
//! assert!(matches!(events.last(), Some(DrawEvent::Completed(Shape::Flat(ring))) if ring.len() == 3));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and the geometry crates.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod draw;
mod edit;
mod error;
mod event;
mod options;
pub mod press;
pub mod timer;

pub use draw::{DrawSession, DrawState};
pub use edit::{EditSession, EditState};
pub use error::{DrawError, EditError};
pub use event::{
    DrawEvent, DrawEvents, EditEvent, EditEvents, Modifiers, PointerEvent, PointerKind,
};
pub use options::{DrawErrorStyle, DrawOptions, EditOptions};
pub use press::PointerId;

pub use waymark_snap::{SnapGeometry, SnapLayer, SnapOptions};
