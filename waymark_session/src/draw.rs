// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing a new polyline or polygon vertex by vertex.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use kurbo::Line;
use waymark_chain::{Chain, Vertex, VertexOwner};
use waymark_geom::measure::readable_distance;
use waymark_geom::{GeoPoint, Projection};
use waymark_snap::{SnapLayer, Snapper};

use crate::error::DrawError;
use crate::event::{DrawEvent, DrawEvents, Modifiers, PointerEvent, PointerKind};
use crate::options::DrawOptions;
use crate::press::{PressResult, PressState};
use crate::timer::{Deferred, ErrorIndicator};

/// Lifecycle of a [`DrawSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawState {
    /// Not started yet.
    Inactive,
    /// Placing vertices.
    Active,
    /// Finished; the shape was handed to the host.
    Completed,
    /// Discarded.
    Cancelled,
}

/// Interaction state machine for drawing a new shape.
///
/// `O` decides the shape kind ([`Polyline`](waymark_chain::Polyline) or
/// [`Polygon`](waymark_chain::Polygon)), `P` maps between the map and the
/// plane, and `K` is the host's snap layer handle.
///
/// Vertices are placed by committing clicks (or taps), validated against the
/// self-intersection rule, and measured as they go. The keyboard undo and
/// redo keys step through a replay cache of placed coordinates: undo drops
/// the newest vertex, redo places the next cached one again. Placing a new
/// vertex discards the cached tail.
pub struct DrawSession<O, P, K = ()> {
    owner: O,
    projection: P,
    options: DrawOptions,
    state: DrawState,
    chain: Chain,
    /// Placed coordinates; the first `chain.len()` entries are on the map.
    ///
    /// Drawing only ever appends to or drops from the end of one ring, so a
    /// cursor over the placed coordinates replaces the snapshot history used
    /// while editing. Undo moves the cursor back, redo replays the coordinate
    /// under it, and `start` empties the cache.
    replay: Vec<GeoPoint>,
    measurement: f64,
    pointer: Option<GeoPoint>,
    snapped: bool,
    snapper: Snapper,
    presses: PressState,
    input_blocked: bool,
    input_timer: Deferred,
    error: ErrorIndicator,
    layers: PhantomData<fn() -> K>,
}

impl<O, P, K> fmt::Debug for DrawSession<O, P, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawSession")
            .field("state", &self.state)
            .field("vertices", &self.chain.len())
            .field("measurement", &self.measurement)
            .field("snapped", &self.snapped)
            .field("error_shown", &self.error.is_shown())
            .finish_non_exhaustive()
    }
}

impl<O: VertexOwner, P: Projection, K: Copy> DrawSession<O, P, K> {
    /// Create an inactive session. Call [`DrawSession::start`] to begin.
    pub fn new(owner: O, projection: P, options: DrawOptions) -> Self {
        Self {
            owner,
            projection,
            presses: PressState::with_threshold(options.jitter_threshold()),
            options,
            state: DrawState::Inactive,
            chain: Chain::new(false),
            replay: Vec::new(),
            measurement: 0.0,
            pointer: None,
            snapped: false,
            snapper: Snapper::new(),
            input_blocked: false,
            input_timer: Deferred::default(),
            error: ErrorIndicator::default(),
            layers: PhantomData,
        }
    }

    /// Begin a new drawing, discarding anything pending.
    pub fn start(&mut self) -> DrawEvents<K> {
        let mut events = DrawEvents::new();
        if self.error.hide() {
            events.push(DrawEvent::ErrorCleared);
        }
        self.state = DrawState::Active;
        self.reset_shape();
        log::debug!("drawing started");
        events.push(DrawEvent::Started);
        events
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Whether vertices are being placed.
    pub fn is_active(&self) -> bool {
        self.state == DrawState::Active
    }

    /// Shape-kind rules in use.
    pub fn owner(&self) -> &O {
        &self.owner
    }

    /// Options in use.
    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    /// The map projection.
    pub fn projection(&self) -> &P {
        &self.projection
    }

    /// Mutable access to the projection, e.g. after the host zoomed.
    pub fn projection_mut(&mut self) -> &mut P {
        &mut self.projection
    }

    /// The placed vertices.
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Number of placed vertices.
    pub fn vertex_count(&self) -> usize {
        self.chain.len()
    }

    /// Coordinates of the placed vertices in order.
    pub fn vertices(&self) -> Vec<GeoPoint> {
        self.chain.positions(0)
    }

    /// Running length of the placed path, scaled by the distance factor.
    pub fn measurement(&self) -> f64 {
        self.measurement
    }

    /// Position of the floating vertex under the pointer (snapped if applicable).
    pub fn pointer(&self) -> Option<GeoPoint> {
        self.pointer
    }

    /// Whether the floating vertex is snapped.
    pub fn is_snapped(&self) -> bool {
        self.snapped
    }

    /// Whether the error indicator is shown.
    pub fn error_shown(&self) -> bool {
        self.error.is_shown()
    }

    /// The vertex that finishes the shape when clicked.
    pub fn finish_anchor(&self) -> Option<GeoPoint> {
        let index = self.owner.finish_anchor(self.chain.len())?;
        self.position_at(index)
    }

    /// Handle a pointer event. `layers` are the current snap candidates.
    pub fn on_pointer(&mut self, event: &PointerEvent, layers: &[SnapLayer<K>]) -> DrawEvents<K> {
        let mut events = self.poll(event.time);
        if !self.is_active() {
            return events;
        }
        match event.kind {
            PointerKind::Move => self.track_pointer(event, layers, &mut events),
            PointerKind::Down => {
                if self.accepts_press(event) {
                    self.track_pointer(event, layers, &mut events);
                    self.input_blocked = true;
                    self.presses.on_down(event.pointer, event.client, event.time);
                }
            }
            PointerKind::Up => {
                let result = self.presses.on_up(event.pointer, event.client, event.time);
                if result.press().is_some() {
                    self.commit(event, result, &mut events);
                    self.input_timer
                        .arm(event.time, self.options.input_cooldown_ms);
                }
            }
            PointerKind::Touch => {
                if self.accepts_press(event) {
                    self.track_pointer(event, layers, &mut events);
                    self.input_blocked = true;
                    self.presses.on_down(event.pointer, event.client, event.time);
                    let result = self.presses.on_up(event.pointer, event.client, event.time);
                    self.commit(event, result, &mut events);
                    self.input_timer
                        .arm(event.time, self.options.input_cooldown_ms);
                }
            }
            PointerKind::Cancel => {
                if self.presses.cancel(event.pointer)
                    && self.presses.is_empty()
                    && !self.input_timer.is_pending()
                {
                    log::trace!("press cancelled, input re-enabled");
                    self.input_blocked = false;
                }
            }
        }
        events
    }

    /// Handle a key press: the undo and redo keys step through placed vertices.
    pub fn on_key(&mut self, key: char, now: u64) -> DrawEvents<K> {
        let mut events = self.poll(now);
        let result = if key == self.options.undo_key {
            self.undo()
        } else if key == self.options.redo_key {
            self.redo(now)
        } else {
            return events;
        };
        absorb(&mut events, result);
        events
    }

    /// Fire due timers: re-enable input after a placement, clear the error indicator.
    pub fn poll(&mut self, now: u64) -> DrawEvents<K> {
        let mut events = DrawEvents::new();
        if self.input_timer.fire(now) {
            log::trace!("input re-enabled at {now}");
            self.input_blocked = false;
        }
        if self.error.poll(now) {
            events.push(DrawEvent::ErrorCleared);
        }
        events
    }

    /// Append a vertex.
    ///
    /// With intersections disallowed, a vertex whose segment would cross an
    /// earlier one is refused and the error indicator shown until
    /// `now + timeout`.
    pub fn add_vertex(&mut self, position: GeoPoint, now: u64) -> Result<DrawEvents<K>, DrawError> {
        let events = self.append(position, now)?;
        self.replay.truncate(self.chain.len() - 1);
        self.replay.push(position);
        Ok(events)
    }

    /// Remove the newest vertex. A no-op while at most one vertex is placed.
    pub fn delete_last_vertex(&mut self) -> Result<DrawEvents<K>, DrawError> {
        self.ensure_active()?;
        let mut events = DrawEvents::new();
        let placed = self.chain.len();
        if placed <= 1 {
            return Ok(events);
        }
        let index = placed - 1;
        let Some(position) = self.chain.remove_at(0, index, &self.projection) else {
            return Ok(events);
        };
        self.measurement = match self.position_at(index - 1) {
            Some(previous) if index > 1 => {
                self.measurement
                    - self.projection.distance(previous, position) * self.options.scale_factor()
            }
            _ => 0.0,
        };
        log::debug!("vertex {index} removed");
        events.push(DrawEvent::VertexRemoved { index, position });
        Ok(events)
    }

    /// Drop the newest vertex, keeping it available to [`DrawSession::redo`].
    pub fn undo(&mut self) -> Result<DrawEvents<K>, DrawError> {
        self.delete_last_vertex()
    }

    /// Place the next cached vertex again. A no-op at the end of the cache.
    pub fn redo(&mut self, now: u64) -> Result<DrawEvents<K>, DrawError> {
        self.ensure_active()?;
        let Some(&position) = self.replay.get(self.chain.len()) else {
            return Ok(DrawEvents::new());
        };
        self.append(position, now)
    }

    /// Finish the drawing and hand the shape to the host.
    ///
    /// Refused with [`DrawError::InvalidShape`] below the shape kind's minimum
    /// vertex count, and with [`DrawError::SelfIntersection`] if intersections
    /// are disallowed and the outline (including a polygon's closing segment)
    /// crosses itself. With `repeat_mode` a new drawing starts immediately.
    pub fn finish(&mut self, now: u64) -> Result<DrawEvents<K>, DrawError> {
        self.ensure_active()?;
        let placed = self.chain.len();
        let min = self.owner.min_vertices();
        if placed < min {
            return Err(self.fail(DrawError::InvalidShape { min, len: placed }, now));
        }
        if !self.options.allow_intersection
            && self
                .owner
                .self_intersects(&self.chain.projected(0, &self.projection))
        {
            return Err(self.fail(DrawError::SelfIntersection, now));
        }

        let mut events = DrawEvents::new();
        if self.error.hide() {
            events.push(DrawEvent::ErrorCleared);
        }
        let shape = self.owner.on_complete(self.chain.positions(0));
        self.state = DrawState::Completed;
        self.clear_input();
        log::debug!("drawing completed with {placed} vertices");
        events.push(DrawEvent::Completed(shape));
        if self.options.repeat_mode {
            events.extend(self.start());
        }
        Ok(events)
    }

    /// Discard the drawing.
    pub fn cancel(&mut self) -> Result<DrawEvents<K>, DrawError> {
        self.ensure_active()?;
        let mut events = DrawEvents::new();
        if self.error.hide() {
            events.push(DrawEvent::ErrorCleared);
        }
        self.state = DrawState::Cancelled;
        self.reset_shape();
        log::debug!("drawing cancelled");
        events.push(DrawEvent::Cancelled);
        Ok(events)
    }

    /// Rendered length of the placed path plus the live segment to the pointer.
    ///
    /// `None` when measurement is disabled or nothing is placed yet.
    pub fn measurement_text(&self) -> Option<String> {
        if !self.options.measurement_enabled {
            return None;
        }
        let last = self.last_position()?;
        let live = self.pointer.map_or(0.0, |p| {
            self.projection.distance(p, last) * self.options.scale_factor()
        });
        Some(readable_distance(
            self.measurement + live,
            self.options.measurement_unit,
        ))
    }

    /// Projected segment from the newest vertex to the pointer.
    pub fn guide(&self) -> Option<Line> {
        let last = self.last_position()?;
        let pointer = self.pointer?;
        Some(Line::new(
            self.projection.project(last),
            self.projection.project(pointer),
        ))
    }

    fn append(&mut self, position: GeoPoint, now: u64) -> Result<DrawEvents<K>, DrawError> {
        self.ensure_active()?;
        let placed = self.chain.len();
        if placed >= 2 && !self.options.allow_intersection {
            let points = self.chain.projected(0, &self.projection);
            if self
                .owner
                .new_point_intersects(&points, self.projection.project(position))
            {
                return Err(self.fail(DrawError::SelfIntersection, now));
            }
        }

        let mut events = DrawEvents::new();
        if self.error.hide() {
            events.push(DrawEvent::ErrorCleared);
        }
        let previous = self.last_position();
        self.chain.push(0, position);
        self.measurement = match previous {
            Some(previous) => {
                self.measurement
                    + self.projection.distance(previous, position) * self.options.scale_factor()
            }
            None => 0.0,
        };
        log::debug!("vertex {placed} placed");
        events.push(DrawEvent::VertexAdded {
            index: placed,
            position,
        });
        Ok(events)
    }

    /// Decide what a released press does.
    fn commit(&mut self, event: &PointerEvent, result: PressResult, events: &mut DrawEvents<K>) {
        let now = event.time;
        let target = match self.pointer {
            Some(snapped) if self.snapped => snapped,
            _ => event.position,
        };
        let touch = event.kind == PointerKind::Touch;
        let anchor_distance = self.finish_anchor_distance(event.position);
        let max = self.options.max_vertex_count;

        let outcome = if !touch && result.is_click() && anchor_distance < self.options.finish_radius
        {
            self.finish(now)
        } else if result.is_click() && max > 1 && max == self.chain.len() + 1 {
            match self.add_vertex(target, now) {
                Ok(added) => {
                    events.extend(added);
                    self.finish(now)
                }
                Err(err) => Err(err),
            }
        } else if touch && anchor_distance < self.options.touch_finish_distance {
            self.finish(now)
        } else if result.is_click() {
            self.add_vertex(target, now)
        } else {
            Ok(DrawEvents::new())
        };
        absorb(events, outcome);
    }

    fn track_pointer(
        &mut self,
        event: &PointerEvent,
        layers: &[SnapLayer<K>],
        events: &mut DrawEvents<K>,
    ) {
        let mut position = event.position;
        self.snapped = false;
        if self.options.snap.enabled && !event.modifiers.contains(Modifiers::ALT) {
            let outcome = self.snapper.snap(
                layers,
                event.position,
                self.options.snap.tolerance(),
                &self.projection,
            );
            position = outcome.position;
            self.snapped = outcome.snapped;
            if let Some(change) = outcome.event {
                events.push(change.into());
            }
        }
        self.pointer = Some(position);
    }

    fn accepts_press(&self, event: &PointerEvent) -> bool {
        !self.input_blocked && !self.presses.is_pressed(event.pointer)
    }

    fn finish_anchor_distance(&self, position: GeoPoint) -> f64 {
        self.finish_anchor().map_or(f64::INFINITY, |anchor| {
            self.projection
                .project(anchor)
                .distance(self.projection.project(position))
        })
    }

    fn position_at(&self, index: usize) -> Option<GeoPoint> {
        let id = self.chain.vertex_at(0, index)?;
        self.chain.vertex(id).map(Vertex::position)
    }

    fn last_position(&self) -> Option<GeoPoint> {
        self.position_at(self.chain.len().checked_sub(1)?)
    }

    fn ensure_active(&self) -> Result<(), DrawError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(DrawError::NotActive)
        }
    }

    fn fail(&mut self, error: DrawError, now: u64) -> DrawError {
        log::debug!("draw refused: {error}");
        self.error.show(now, self.options.error.timeout_ms);
        error
    }

    fn reset_shape(&mut self) {
        self.chain = Chain::new(false);
        self.replay.clear();
        self.measurement = 0.0;
        self.pointer = None;
        self.clear_input();
    }

    fn clear_input(&mut self) {
        self.presses.clear();
        self.input_blocked = false;
        self.input_timer.cancel();
        self.snapper.reset();
        self.snapped = false;
    }
}

/// Fold an operation's outcome into a handler's event list.
fn absorb<K>(events: &mut DrawEvents<K>, result: Result<DrawEvents<K>, DrawError>) {
    match result {
        Ok(more) => events.extend(more),
        Err(DrawError::NotActive) => {}
        Err(err) => events.push(DrawEvent::ErrorShown(err)),
    }
}
