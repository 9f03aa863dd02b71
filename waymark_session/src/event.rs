// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input delivered by the host and notifications handed back.

use kurbo::Point;
use smallvec::SmallVec;
use waymark_chain::{Shape, VertexId};
use waymark_geom::GeoPoint;
use waymark_snap::SnapEvent;

use crate::error::{DrawError, EditError};
use crate::press::PointerId;

bitflags::bitflags! {
    /// Keyboard modifiers held during a pointer event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Alt/Option. Suppresses snapping for the event.
        const ALT   = 0b0000_0001;
        /// Shift.
        const SHIFT = 0b0000_0010;
        /// Control.
        const CTRL  = 0b0000_0100;
        /// Meta/Command.
        const META  = 0b0000_1000;
    }
}

/// Kind of pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse or pen pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Mouse or pen released.
    Up,
    /// A tap. Handled as press and release in one step.
    Touch,
    /// The host lost the pointer before its release.
    Cancel,
}

/// One pointer event from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerKind,
    /// Position in client (screen) pixels.
    pub client: Point,
    /// Position on the map.
    pub position: GeoPoint,
    /// Host timestamp in milliseconds.
    pub time: u64,
    /// Pointer identifier; `None` for the primary pointer.
    pub pointer: Option<PointerId>,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Primary-pointer event without modifiers.
    pub fn new(kind: PointerKind, client: Point, position: GeoPoint, time: u64) -> Self {
        Self {
            kind,
            client,
            position,
            time,
            pointer: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// The same event with `modifiers` held.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Notification from a [`DrawSession`](crate::DrawSession).
///
/// `K` is the host's snap layer handle.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawEvent<K> {
    /// A new drawing started.
    Started,
    /// A vertex was appended.
    VertexAdded {
        /// Index of the new vertex.
        index: usize,
        /// Its coordinates.
        position: GeoPoint,
    },
    /// The newest vertex was removed.
    VertexRemoved {
        /// Index the vertex had.
        index: usize,
        /// Its coordinates.
        position: GeoPoint,
    },
    /// The drawing finished.
    Completed(Shape),
    /// The drawing was discarded.
    Cancelled,
    /// The floating vertex snapped to a layer.
    Snapped {
        /// Layer snapped to.
        layer: K,
        /// Coordinate snapped to.
        latlng: GeoPoint,
        /// Segment the coordinate lies on, if any.
        segment: Option<[GeoPoint; 2]>,
    },
    /// The floating vertex left its snap.
    Unsnapped {
        /// Coordinate of the released snap.
        latlng: GeoPoint,
    },
    /// The error indicator appeared.
    ErrorShown(DrawError),
    /// The error indicator went away.
    ErrorCleared,
}

/// Notification from an [`EditSession`](crate::EditSession).
#[derive(Clone, Debug, PartialEq)]
pub enum EditEvent<K> {
    /// A drag (or middle-marker click) began modifying the shape.
    EditStart,
    /// A middle marker became a real vertex.
    VertexInserted {
        /// The promoted marker, now a vertex.
        vertex: VertexId,
        /// Ring it was inserted into.
        ring: usize,
        /// Its index in the ring.
        index: usize,
    },
    /// A dragged vertex moved.
    EditDrag {
        /// The dragged vertex.
        vertex: VertexId,
        /// Its new coordinates.
        position: GeoPoint,
    },
    /// A vertex was removed.
    VertexRemoved {
        /// Ring it was removed from.
        ring: usize,
        /// Index it had.
        index: usize,
    },
    /// An edit was committed (drag end, promotion click, removal, undo, redo).
    Edited(Shape),
    /// A dragged vertex snapped to a layer.
    Snapped {
        /// Layer snapped to.
        layer: K,
        /// Coordinate snapped to.
        latlng: GeoPoint,
        /// Segment the coordinate lies on, if any.
        segment: Option<[GeoPoint; 2]>,
    },
    /// A dragged vertex left its snap.
    Unsnapped {
        /// Coordinate of the released snap.
        latlng: GeoPoint,
    },
    /// The error indicator appeared.
    ErrorShown(EditError),
    /// The error indicator went away.
    ErrorCleared,
}

impl<K> From<SnapEvent<K>> for DrawEvent<K> {
    fn from(event: SnapEvent<K>) -> Self {
        match event {
            SnapEvent::Snapped {
                layer,
                latlng,
                segment,
            } => Self::Snapped {
                layer,
                latlng,
                segment,
            },
            SnapEvent::Unsnapped { latlng } => Self::Unsnapped { latlng },
        }
    }
}

impl<K> From<SnapEvent<K>> for EditEvent<K> {
    fn from(event: SnapEvent<K>) -> Self {
        match event {
            SnapEvent::Snapped {
                layer,
                latlng,
                segment,
            } => Self::Snapped {
                layer,
                latlng,
                segment,
            },
            SnapEvent::Unsnapped { latlng } => Self::Unsnapped { latlng },
        }
    }
}

/// Events produced by one draw-session call. Most calls produce at most a few.
pub type DrawEvents<K> = SmallVec<[DrawEvent<K>; 4]>;

/// Events produced by one edit-session call.
pub type EditEvents<K> = SmallVec<[EditEvent<K>; 4]>;
