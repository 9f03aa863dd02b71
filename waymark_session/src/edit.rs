// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editing an existing polyline or polygon.

use core::fmt;
use core::marker::PhantomData;

use kurbo::{Point, Rect};
use waymark_chain::{Chain, Shape, ShapeKind, Vertex, VertexId, VertexOwner};
use waymark_geom::{GeoPoint, Projection};
use waymark_history::History;
use waymark_snap::{SnapLayer, Snapper};

use crate::error::EditError;
use crate::event::{EditEvent, EditEvents, Modifiers};
use crate::options::EditOptions;
use crate::timer::ErrorIndicator;

/// What an [`EditSession`] is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditState {
    /// Waiting for a drag or click.
    Idle,
    /// A vertex is being dragged.
    Dragging(VertexId),
}

/// Interaction state machine for editing a shape's vertices.
///
/// The shape lives in a [`Chain`] whose real vertices can be dragged or
/// removed and whose middle markers become real vertices when dragged or
/// clicked. Every committed change first records a snapshot of the shape, so
/// undo and redo restore whole shapes (rebuilding the chain, which makes
/// earlier vertex ids stale).
pub struct EditSession<P, K = ()> {
    kind: ShapeKind,
    projection: P,
    options: EditOptions,
    chain: Chain,
    history: History<Shape>,
    state: EditState,
    snapper: Snapper,
    error: ErrorIndicator,
    bounds: Option<Rect>,
    edited: bool,
    layers: PhantomData<fn() -> K>,
}

impl<P, K> fmt::Debug for EditSession<P, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("chain", &self.chain)
            .field("undo", &self.history.undo_len())
            .field("redo", &self.history.redo_len())
            .field("edited", &self.edited)
            .finish_non_exhaustive()
    }
}

impl<P: Projection, K: Copy> EditSession<P, K> {
    /// Start editing `shape`.
    pub fn new(kind: ShapeKind, shape: &Shape, projection: P, options: EditOptions) -> Self {
        let chain = Chain::from_shape(shape, kind.is_closed_ring(), &projection);
        Self {
            kind,
            chain,
            projection,
            history: History::with_limit(options.undo_redo_stack_limit),
            options,
            state: EditState::Idle,
            snapper: Snapper::new(),
            error: ErrorIndicator::default(),
            bounds: shape.bounds(),
            edited: false,
            layers: PhantomData,
        }
    }

    /// Shape kind being edited.
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Options in use.
    pub fn options(&self) -> &EditOptions {
        &self.options
    }

    /// The map projection.
    pub fn projection(&self) -> &P {
        &self.projection
    }

    /// Vertices and middle markers.
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Snapshot history.
    pub fn history(&self) -> &History<Shape> {
        &self.history
    }

    /// Current state.
    pub fn state(&self) -> EditState {
        self.state
    }

    /// Current shape coordinates.
    pub fn shape(&self) -> Shape {
        self.chain.to_shape()
    }

    /// Bounding box of the shape (x is longitude, y is latitude).
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Whether any edit has been committed.
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    /// Whether the error indicator is shown.
    pub fn error_shown(&self) -> bool {
        self.error.is_shown()
    }

    /// The vertex or middle marker under a projected point, if any.
    pub fn marker_at(&self, point: Point) -> Option<VertexId> {
        self.chain
            .hit_test(point, self.options.hit_radius, &self.projection)
    }

    /// Begin dragging a vertex or middle marker.
    ///
    /// Records a snapshot of the shape first. A middle marker is promoted to
    /// a real vertex, which is what gets dragged.
    pub fn drag_start(&mut self, id: VertexId, now: u64) -> Result<EditEvents<K>, EditError> {
        if self.state != EditState::Idle {
            return Err(EditError::DragInProgress);
        }
        let is_middle = self.lookup(id)?.is_middle();

        let mut events = self.poll(now);
        self.history.record(self.chain.to_shape());
        self.snapper.reset();
        events.push(EditEvent::EditStart);
        if is_middle {
            self.promote(id, &mut events);
        }
        self.state = EditState::Dragging(id);
        log::debug!("drag started on {id:?}");
        Ok(events)
    }

    /// Move the dragged vertex towards `position`, snapping unless `ALT` is held.
    ///
    /// With intersections disallowed, a position that makes the shape cross
    /// itself is kept but shows the error indicator.
    pub fn drag(
        &mut self,
        id: VertexId,
        position: GeoPoint,
        modifiers: Modifiers,
        layers: &[SnapLayer<K>],
        now: u64,
    ) -> Result<EditEvents<K>, EditError> {
        if self.state != EditState::Dragging(id) {
            return Err(EditError::NotDragging(id));
        }
        let mut events = self.poll(now);
        let mut target = position;
        if self.options.snap.enabled && !modifiers.contains(Modifiers::ALT) {
            let outcome =
                self.snapper
                    .snap(layers, position, self.options.snap.tolerance(), &self.projection);
            target = outcome.position;
            if let Some(change) = outcome.event {
                events.push(change.into());
            }
        }
        self.chain.move_vertex(id, target, &self.projection);
        self.bounds = self.chain.to_shape().bounds();
        events.push(EditEvent::EditDrag {
            vertex: id,
            position: target,
        });

        if !self.options.allow_intersection && self.intersects() {
            self.refuse(EditError::SelfIntersection, now, &mut events);
        }
        Ok(events)
    }

    /// Finish dragging and commit the edit.
    pub fn drag_end(&mut self, id: VertexId, now: u64) -> Result<EditEvents<K>, EditError> {
        if self.state != EditState::Dragging(id) {
            return Err(EditError::NotDragging(id));
        }
        let mut events = self.poll(now);
        self.state = EditState::Idle;
        self.snapper.reset();
        self.edited = true;
        log::debug!("drag ended on {id:?}");
        events.push(EditEvent::Edited(self.chain.to_shape()));
        Ok(events)
    }

    /// Handle a click on a vertex or middle marker.
    ///
    /// A middle marker is promoted to a real vertex. A real vertex is removed
    /// when `remove_on_click` is set; otherwise nothing happens. A removal
    /// refused at the ring's minimum is reported as
    /// [`EditEvent::ErrorShown`].
    pub fn click(&mut self, id: VertexId, now: u64) -> Result<EditEvents<K>, EditError> {
        if self.state != EditState::Idle {
            return Err(EditError::DragInProgress);
        }
        let is_middle = self.lookup(id)?.is_middle();
        if !is_middle {
            return if self.options.remove_on_click {
                match self.try_remove(id, now) {
                    Err(err @ EditError::TooFewVertices { .. }) => {
                        let mut events = self.poll(now);
                        self.refuse(err, now, &mut events);
                        Ok(events)
                    }
                    other => other,
                }
            } else {
                Ok(self.poll(now))
            };
        }

        let mut events = self.poll(now);
        self.history.record(self.chain.to_shape());
        events.push(EditEvent::EditStart);
        self.promote(id, &mut events);
        self.edited = true;
        events.push(EditEvent::Edited(self.chain.to_shape()));
        Ok(events)
    }

    /// Remove a real vertex.
    ///
    /// Refused with [`EditError::TooFewVertices`] when its ring is already at
    /// the shape kind's minimum; the refusal also shows the error indicator.
    pub fn remove_vertex(&mut self, id: VertexId, now: u64) -> Result<EditEvents<K>, EditError> {
        let result = self.try_remove(id, now);
        if let Err(EditError::TooFewVertices { .. }) = result {
            self.error.show(now, self.options.error.timeout_ms);
        }
        result
    }

    fn try_remove(&mut self, id: VertexId, now: u64) -> Result<EditEvents<K>, EditError> {
        if self.state != EditState::Idle {
            return Err(EditError::DragInProgress);
        }
        let vertex = self.lookup(id)?;
        let (ring, index) = match vertex.index() {
            Some(index) if !vertex.is_middle() => (vertex.ring(), index),
            _ => return Err(EditError::MiddleMarker(id)),
        };
        let min = self.kind.min_vertices();
        if self.chain.ring_len(ring) <= min {
            log::debug!("refused to remove {id:?}: ring {ring} is at its minimum");
            return Err(EditError::TooFewVertices { min });
        }

        let mut events = self.poll(now);
        self.history.record(self.chain.to_shape());
        self.chain.remove_at(ring, index, &self.projection);
        self.bounds = self.chain.to_shape().bounds();
        self.edited = true;
        events.push(EditEvent::VertexRemoved { ring, index });
        events.push(EditEvent::Edited(self.chain.to_shape()));
        Ok(events)
    }

    /// Restore the shape before the last committed edit.
    ///
    /// Ignored while dragging. Rebuilding makes earlier vertex ids stale.
    pub fn undo(&mut self, now: u64) -> EditEvents<K> {
        let mut events = self.poll(now);
        if self.state != EditState::Idle {
            log::debug!("undo ignored during a drag");
            return events;
        }
        if let Some(previous) = self.history.undo(self.chain.to_shape()) {
            self.restore(&previous);
            events.push(EditEvent::Edited(previous));
        }
        events
    }

    /// Reapply the last undone edit. Ignored while dragging.
    pub fn redo(&mut self, now: u64) -> EditEvents<K> {
        let mut events = self.poll(now);
        if self.state != EditState::Idle {
            log::debug!("redo ignored during a drag");
            return events;
        }
        if let Some(next) = self.history.redo(self.chain.to_shape()) {
            self.restore(&next);
            events.push(EditEvent::Edited(next));
        }
        events
    }

    /// Handle a key press: the undo and redo keys step through the history.
    pub fn on_key(&mut self, key: char, now: u64) -> EditEvents<K> {
        if key == self.options.undo_key {
            self.undo(now)
        } else if key == self.options.redo_key {
            self.redo(now)
        } else {
            self.poll(now)
        }
    }

    /// Fire due timers.
    pub fn poll(&mut self, now: u64) -> EditEvents<K> {
        let mut events = EditEvents::new();
        if self.error.poll(now) {
            events.push(EditEvent::ErrorCleared);
        }
        events
    }

    /// Show (or keep showing) the error indicator, announcing it when it appears.
    fn refuse(&mut self, error: EditError, now: u64, events: &mut EditEvents<K>) {
        if !self.error.is_shown() {
            events.push(EditEvent::ErrorShown(error));
        }
        self.error.show(now, self.options.error.timeout_ms);
    }

    fn lookup(&self, id: VertexId) -> Result<&Vertex, EditError> {
        self.chain.vertex(id).ok_or_else(|| {
            log::warn!("unknown vertex {id:?}");
            EditError::UnknownVertex(id)
        })
    }

    fn promote(&mut self, marker: VertexId, events: &mut EditEvents<K>) {
        let Some(index) = self.chain.promote_middle_marker(marker, &self.projection) else {
            return;
        };
        let ring = self.chain.vertex(marker).map_or(0, Vertex::ring);
        events.push(EditEvent::VertexInserted {
            vertex: marker,
            ring,
            index,
        });
    }

    fn intersects(&self) -> bool {
        (0..self.chain.ring_count()).any(|ring| {
            self.kind
                .self_intersects(&self.chain.projected(ring, &self.projection))
        })
    }

    fn restore(&mut self, shape: &Shape) {
        self.chain.rebuild(shape, &self.projection);
        self.bounds = shape.bounds();
        self.edited = true;
    }
}
