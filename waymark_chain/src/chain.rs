// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena of vertices and middle markers linked into rings.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use waymark_geom::{GeoPoint, Projection, midpoint};

use crate::shape::{Ring, Shape};

/// Identifier for a vertex or middle marker in a [`Chain`] (generational).
///
/// Ids of removed entries never alias entries created later.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct VertexId(u32, u32);

impl VertexId {
    const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// What an arena entry is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexKind {
    /// A vertex of the shape.
    Real,
    /// A handle sitting at the projected midpoint of two adjacent vertices.
    /// Dragging or clicking it inserts a new vertex between them.
    Middle {
        /// Vertex before the marker.
        left: VertexId,
        /// Vertex after the marker.
        right: VertexId,
    },
}

/// One entry of a [`Chain`].
#[derive(Clone, Debug)]
pub struct Vertex {
    generation: u32,
    position: GeoPoint,
    kind: VertexKind,
    nest: Option<usize>,
    index: Option<usize>,
    prev: Option<VertexId>,
    next: Option<VertexId>,
    middle_left: Option<VertexId>,
    middle_right: Option<VertexId>,
}

impl Vertex {
    fn new(position: GeoPoint, kind: VertexKind, nest: Option<usize>, index: Option<usize>) -> Self {
        Self {
            generation: 0,
            position,
            kind,
            nest,
            index,
            prev: None,
            next: None,
            middle_left: None,
            middle_right: None,
        }
    }

    /// Current coordinates.
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    /// Real vertex or middle marker.
    pub fn kind(&self) -> VertexKind {
        self.kind
    }

    /// Whether this entry is a middle marker.
    pub fn is_middle(&self) -> bool {
        matches!(self.kind, VertexKind::Middle { .. })
    }

    /// Position within the ring. `None` for middle markers.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Ring number in a nested shape. `None` for flat shapes.
    pub fn nest_index(&self) -> Option<usize> {
        self.nest
    }

    /// Ring this entry belongs to (0 for flat shapes).
    pub fn ring(&self) -> usize {
        self.nest.unwrap_or(0)
    }

    /// Previous vertex in the ring.
    pub fn prev(&self) -> Option<VertexId> {
        self.prev
    }

    /// Next vertex in the ring.
    pub fn next(&self) -> Option<VertexId> {
        self.next
    }

    /// Middle marker between [`Vertex::prev`] and this vertex.
    pub fn middle_left(&self) -> Option<VertexId> {
        self.middle_left
    }

    /// Middle marker between this vertex and [`Vertex::next`].
    pub fn middle_right(&self) -> Option<VertexId> {
        self.middle_right
    }
}

/// Vertices of a shape, linked per ring, plus the middle markers between them.
///
/// Invariants kept by every operation:
///
/// - A real vertex's index equals its position in its ring's order.
/// - `prev`/`next` follow ring order; for closed rings the last and first
///   vertices are linked to each other.
/// - Middle markers exist only between adjacent vertices, at most one per
///   pair. Removing a vertex never leaves a marker pointing at it.
#[derive(Clone)]
pub struct Chain {
    slots: Vec<Option<Vertex>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    rings: Vec<Vec<VertexId>>,
    closed: bool,
    nested: bool,
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Chain")
            .field("rings", &self.rings.len())
            .field("vertices", &self.len())
            .field("live_entries", &live)
            .field("free_list", &self.free_list.len())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl Chain {
    /// Create an empty single-ring chain.
    pub fn new(closed: bool) -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            rings: alloc::vec![Vec::new()],
            closed,
            nested: false,
        }
    }

    /// Build a chain (with middle markers) from shape coordinates.
    pub fn from_shape<P: Projection + ?Sized>(shape: &Shape, closed: bool, projection: &P) -> Self {
        let mut chain = Self::new(closed);
        chain.rebuild(shape, projection);
        chain
    }

    /// Discard every entry and rebuild from `shape`.
    ///
    /// Each ring with at least two vertices gets one middle marker per
    /// adjacent pair, plus one for the last-to-first pair when closed.
    /// Previously issued ids become stale.
    pub fn rebuild<P: Projection + ?Sized>(&mut self, shape: &Shape, projection: &P) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.free_list.push(idx);
            }
        }
        self.nested = !shape.is_flat();
        self.rings.clear();

        for (ring, coords) in shape.rings().iter().enumerate() {
            let nest = self.nested.then_some(ring);
            let ids: Vec<VertexId> = coords
                .iter()
                .enumerate()
                .map(|(i, p)| self.alloc(Vertex::new(*p, VertexKind::Real, nest, Some(i))))
                .collect();
            let len = ids.len();
            self.rings.push(ids);
            for pos in 0..len {
                self.relink(ring, pos);
            }
            if len < 2 {
                continue;
            }
            for i in 0..len {
                if i == 0 && !self.closed {
                    continue;
                }
                let j = if i == 0 { len - 1 } else { i - 1 };
                let (left, right) = (self.rings[ring][j], self.rings[ring][i]);
                self.create_middle_marker(left, right, projection);
            }
        }
        if self.rings.is_empty() {
            self.rings.push(Vec::new());
        }
    }

    /// Whether rings close back on themselves.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether the chain was built from a nested shape.
    pub fn is_nested(&self) -> bool {
        self.nested
    }

    /// Number of rings.
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Real vertices of a ring in order. Empty for an unknown ring.
    pub fn ring(&self, ring: usize) -> &[VertexId] {
        self.rings.get(ring).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of real vertices in a ring.
    pub fn ring_len(&self, ring: usize) -> usize {
        self.ring(ring).len()
    }

    /// Number of real vertices across all rings.
    pub fn len(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    /// Whether there are no real vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up an entry. Returns `None` for stale ids.
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.slots
            .get(id.idx())?
            .as_ref()
            .filter(|v| v.generation == id.1)
    }

    /// Whether `id` refers to a live entry.
    pub fn is_alive(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    /// Real vertex at `index` of `ring`.
    pub fn vertex_at(&self, ring: usize, index: usize) -> Option<VertexId> {
        self.ring(ring).get(index).copied()
    }

    /// Iterate live middle markers.
    pub fn middle_markers(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.entries()
            .filter(|(_, v)| v.is_middle())
            .map(|(id, _)| id)
    }

    /// Coordinates of a ring in order.
    pub fn positions(&self, ring: usize) -> Ring {
        self.ring(ring)
            .iter()
            .filter_map(|id| self.vertex(*id))
            .map(Vertex::position)
            .collect()
    }

    /// Projected coordinates of a ring in order.
    pub fn projected<P: Projection + ?Sized>(&self, ring: usize, projection: &P) -> Vec<Point> {
        self.ring(ring)
            .iter()
            .filter_map(|id| self.vertex(*id))
            .map(|v| projection.project(v.position))
            .collect()
    }

    /// Coordinates of every ring, shaped like the input to [`Chain::rebuild`].
    pub fn to_shape(&self) -> Shape {
        if self.nested {
            Shape::Nested((0..self.rings.len()).map(|r| self.positions(r)).collect())
        } else {
            Shape::Flat(self.positions(0))
        }
    }

    /// Insert a real vertex at `index` of `ring`.
    ///
    /// Vertices at or after `index` shift up by one and the neighbours are
    /// relinked. No middle markers are created. Returns `None` for an unknown
    /// ring or an index past the end.
    pub fn insert_at(&mut self, ring: usize, index: usize, position: GeoPoint) -> Option<VertexId> {
        if index > self.rings.get(ring)?.len() {
            return None;
        }
        let nest = self.nested.then_some(ring);
        let id = self.alloc(Vertex::new(position, VertexKind::Real, nest, Some(index)));
        self.place(ring, index, id);
        Some(id)
    }

    /// Append a real vertex to `ring`.
    pub fn push(&mut self, ring: usize, position: GeoPoint) -> Option<VertexId> {
        let len = self.rings.get(ring)?.len();
        self.insert_at(ring, len, position)
    }

    /// Remove the real vertex at `index` of `ring` and return its coordinates.
    ///
    /// The vertex's middle markers go with it. If it had any and both former
    /// neighbours remain (and are distinct), one new marker is created between
    /// them.
    pub fn remove_at<P: Projection + ?Sized>(
        &mut self,
        ring: usize,
        index: usize,
        projection: &P,
    ) -> Option<GeoPoint> {
        let id = *self.rings.get(ring)?.get(index)?;
        let removed = self.vertex(id)?.clone();
        self.rings[ring].remove(index);
        self.free(id);
        for marker in [removed.middle_left, removed.middle_right].into_iter().flatten() {
            self.free(marker);
        }
        self.renumber(ring, index);
        self.relink_around(ring, index);

        if let Some(prev) = removed.prev.and_then(|p| self.vertex_mut(p)) {
            prev.middle_right = None;
        }
        if let Some(next) = removed.next.and_then(|n| self.vertex_mut(n)) {
            next.middle_left = None;
        }
        let had_markers = removed.middle_left.is_some() || removed.middle_right.is_some();
        if let (true, Some(prev), Some(next)) = (had_markers, removed.prev, removed.next) {
            if prev != next {
                self.create_middle_marker(prev, next, projection);
            }
        }
        Some(removed.position)
    }

    /// Remove a real vertex by id.
    pub fn remove_vertex<P: Projection + ?Sized>(
        &mut self,
        id: VertexId,
        projection: &P,
    ) -> Option<GeoPoint> {
        let v = self.vertex(id)?;
        let (ring, index) = (v.ring(), v.index?);
        self.remove_at(ring, index, projection)
    }

    /// Create a middle marker between two adjacent vertices.
    ///
    /// The marker sits at their projected midpoint and is recorded as
    /// `left.middle_right` and `right.middle_left`. A middle marker already in
    /// either of those slots is discarded.
    pub fn create_middle_marker<P: Projection + ?Sized>(
        &mut self,
        left: VertexId,
        right: VertexId,
        projection: &P,
    ) -> Option<VertexId> {
        let l = self.vertex(left)?;
        let (a, nest, stale_left) = (l.position, l.nest, l.middle_right);
        let r = self.vertex(right)?;
        let (b, stale_right) = (r.position, r.middle_left);
        for stale in [stale_left, stale_right].into_iter().flatten() {
            if self.vertex(stale).is_some_and(Vertex::is_middle) {
                self.free(stale);
            }
        }

        let kind = VertexKind::Middle { left, right };
        let id = self.alloc(Vertex::new(midpoint(projection, a, b), kind, nest, None));
        if let Some(l) = self.vertex_mut(left) {
            l.middle_right = Some(id);
        }
        if let Some(r) = self.vertex_mut(right) {
            r.middle_left = Some(id);
        }
        Some(id)
    }

    /// Turn a middle marker into a real vertex.
    ///
    /// The vertex takes the index of the marker's right neighbour (0 for the
    /// marker on a closed ring's last-to-first segment) and two new middle
    /// markers are created on either side of it. Returns the new index, or
    /// `None` if `marker` is not a live middle marker.
    pub fn promote_middle_marker<P: Projection + ?Sized>(
        &mut self,
        marker: VertexId,
        projection: &P,
    ) -> Option<usize> {
        let VertexKind::Middle { left, right } = self.vertex(marker)?.kind else {
            return None;
        };
        let r = self.vertex(right)?;
        let (ring, index) = (r.ring(), r.index?);
        if let Some(m) = self.vertex_mut(marker) {
            m.kind = VertexKind::Real;
            m.index = Some(index);
        }
        self.place(ring, index, marker);
        self.create_middle_marker(left, marker, projection);
        self.create_middle_marker(marker, right, projection);
        log::trace!("promoted middle marker to vertex {index} of ring {ring}");
        Some(index)
    }

    /// Move an entry and keep its adjacent middle markers centred.
    pub fn move_vertex<P: Projection + ?Sized>(
        &mut self,
        id: VertexId,
        position: GeoPoint,
        projection: &P,
    ) -> bool {
        let Some(v) = self.vertex_mut(id) else {
            log::warn!("move_vertex: stale id {id:?}");
            return false;
        };
        v.position = position;
        let markers = [v.middle_left, v.middle_right];
        for marker in markers.into_iter().flatten() {
            self.recentre_marker(marker, projection);
        }
        true
    }

    /// Closest entry whose projected position is within `radius` of `point`.
    ///
    /// Real vertices win over middle markers when both are in range.
    pub fn hit_test<P: Projection + ?Sized>(
        &self,
        point: Point,
        radius: f64,
        projection: &P,
    ) -> Option<VertexId> {
        let mut best: Option<(bool, f64, VertexId)> = None;
        for (id, v) in self.entries() {
            let d = projection.project(v.position).distance(point);
            if d > radius {
                continue;
            }
            let key = (v.is_middle(), d);
            if best.is_none_or(|(m, bd, _)| key < (m, bd)) {
                best = Some((key.0, key.1, id));
            }
        }
        best.map(|(_, _, id)| id)
    }

    fn entries(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            let v = slot.as_ref()?;
            #[expect(
                clippy::cast_possible_truncation,
                reason = "VertexId uses 32-bit indices."
            )]
            let id = VertexId::new(idx as u32, v.generation);
            Some((id, v))
        })
    }

    fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.slots
            .get_mut(id.idx())?
            .as_mut()
            .filter(|v| v.generation == id.1)
    }

    fn alloc(&mut self, mut vertex: Vertex) -> VertexId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generations[idx] = self.generations[idx].saturating_add(1);
            idx
        } else {
            self.slots.push(None);
            self.generations.push(1);
            self.slots.len() - 1
        };
        let generation = self.generations[idx];
        vertex.generation = generation;
        self.slots[idx] = Some(vertex);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "VertexId uses 32-bit indices."
        )]
        let idx = idx as u32;
        VertexId::new(idx, generation)
    }

    fn free(&mut self, id: VertexId) {
        if self.is_alive(id) {
            self.slots[id.idx()] = None;
            self.free_list.push(id.idx());
        }
    }

    fn place(&mut self, ring: usize, index: usize, id: VertexId) {
        self.rings[ring].insert(index, id);
        self.renumber(ring, index);
        self.relink_around(ring, index);
    }

    fn renumber(&mut self, ring: usize, from: usize) {
        for pos in from..self.rings[ring].len() {
            let id = self.rings[ring][pos];
            if let Some(v) = self.vertex_mut(id) {
                v.index = Some(pos);
            }
        }
    }

    /// Relink the entries around `pos`, which may be one past the end after a removal.
    fn relink_around(&mut self, ring: usize, pos: usize) {
        let len = self.rings[ring].len();
        if len == 0 {
            return;
        }
        for candidate in [pos.wrapping_sub(1), pos, pos + 1] {
            let target = if candidate < len {
                candidate
            } else if self.closed {
                // wrapping_sub(1) on 0 lands far past the end and maps to the last vertex.
                if candidate > len { len - 1 } else { 0 }
            } else {
                continue;
            };
            self.relink(ring, target);
        }
    }

    fn relink(&mut self, ring: usize, pos: usize) {
        let ids = &self.rings[ring];
        let len = ids.len();
        let id = ids[pos];
        let (prev, next) = if len < 2 {
            (None, None)
        } else {
            let prev = match pos {
                0 if self.closed => Some(ids[len - 1]),
                0 => None,
                _ => Some(ids[pos - 1]),
            };
            let next = if pos + 1 < len {
                Some(ids[pos + 1])
            } else if self.closed {
                Some(ids[0])
            } else {
                None
            };
            (prev, next)
        };
        if let Some(v) = self.vertex_mut(id) {
            v.prev = prev;
            v.next = next;
        }
    }

    fn recentre_marker<P: Projection + ?Sized>(&mut self, marker: VertexId, projection: &P) {
        let Some(VertexKind::Middle { left, right }) = self.vertex(marker).map(Vertex::kind) else {
            return;
        };
        let (Some(a), Some(b)) = (
            self.vertex(left).map(Vertex::position),
            self.vertex(right).map(Vertex::position),
        ) else {
            return;
        };
        if let Some(m) = self.vertex_mut(marker) {
            m.position = midpoint(projection, a, b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use waymark_geom::Planar;

    fn gp(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng)
    }

    fn line(n: usize) -> Shape {
        Shape::Flat((0..n).map(|i| gp(0.0, i as f64 * 10.0)).collect())
    }

    /// Index order, links and one-marker-per-adjacent-pair.
    fn assert_consistent(chain: &Chain) {
        let mut expected_markers = 0;
        for ring in 0..chain.ring_count() {
            let ids = chain.ring(ring);
            let len = ids.len();
            for (pos, id) in ids.iter().enumerate() {
                let v = chain.vertex(*id).expect("live vertex");
                assert_eq!(v.index(), Some(pos));
                assert!(!v.is_middle());
                if let Some(next) = v.next() {
                    assert_eq!(chain.vertex(next).expect("live next").prev(), Some(*id));
                }
            }
            if len >= 2 {
                let pairs = if chain.is_closed() { len } else { len - 1 };
                expected_markers += pairs;
                for i in 0..pairs {
                    let (l, r) = (ids[i], ids[(i + 1) % len]);
                    let marker = chain.vertex(l).and_then(Vertex::middle_right).expect("marker");
                    assert_eq!(chain.vertex(r).and_then(Vertex::middle_left), Some(marker));
                    assert_eq!(
                        chain.vertex(marker).map(Vertex::kind),
                        Some(VertexKind::Middle { left: l, right: r })
                    );
                }
            }
        }
        assert_eq!(chain.middle_markers().count(), expected_markers);
    }

    #[test]
    fn middle_marker_counts() {
        let proj = Planar::default();
        let cases = [(0, false, 0), (1, true, 0), (2, false, 1), (2, true, 2), (4, false, 3), (4, true, 4)];
        for (n, closed, markers) in cases {
            let chain = Chain::from_shape(&line(n), closed, &proj);
            assert_eq!(chain.middle_markers().count(), markers, "n={n} closed={closed}");
            assert_consistent(&chain);
        }
    }

    #[test]
    fn closed_ring_links_wrap() {
        let proj = Planar::default();
        let chain = Chain::from_shape(&line(3), true, &proj);
        let ids = chain.ring(0).to_vec();
        assert_eq!(chain.vertex(ids[0]).unwrap().prev(), Some(ids[2]));
        assert_eq!(chain.vertex(ids[2]).unwrap().next(), Some(ids[0]));

        let open = Chain::from_shape(&line(3), false, &proj);
        let ids = open.ring(0).to_vec();
        assert_eq!(open.vertex(ids[0]).unwrap().prev(), None);
        assert_eq!(open.vertex(ids[2]).unwrap().next(), None);
    }

    #[test]
    fn insert_shifts_later_indices() {
        let mut chain = Chain::new(false);
        for i in 0..4 {
            chain.push(0, gp(0.0, i as f64)).unwrap();
        }
        let before = chain.ring(0).to_vec();
        let inserted = chain.insert_at(0, 2, gp(5.0, 5.0)).unwrap();

        let after = chain.ring(0);
        assert_eq!(after.len(), 5);
        assert_eq!(after[2], inserted);
        assert_eq!(chain.vertex(before[1]).unwrap().next(), Some(inserted));
        assert_eq!(chain.vertex(before[2]).unwrap().prev(), Some(inserted));
        assert_eq!(chain.vertex(before[2]).unwrap().index(), Some(3));
        assert_eq!(chain.vertex(before[3]).unwrap().index(), Some(4));
        assert_eq!(chain.insert_at(0, 9, gp(0.0, 0.0)), None);
        assert_eq!(chain.insert_at(3, 0, gp(0.0, 0.0)), None);
    }

    #[test]
    fn remove_regenerates_one_marker() {
        let proj = Planar::default();
        let mut chain = Chain::from_shape(&line(5), false, &proj);
        let removed_id = chain.vertex_at(0, 2).unwrap();

        assert_eq!(chain.remove_at(0, 2, &proj), Some(gp(0.0, 20.0)));
        assert!(!chain.is_alive(removed_id));
        assert_eq!(chain.ring_len(0), 4);
        assert_consistent(&chain);

        let left = chain.vertex_at(0, 1).unwrap();
        let marker = chain.vertex(left).unwrap().middle_right().unwrap();
        assert_eq!(chain.vertex(marker).unwrap().position(), gp(0.0, 20.0));
        for m in chain.middle_markers() {
            let VertexKind::Middle { left, right } = chain.vertex(m).unwrap().kind() else {
                unreachable!()
            };
            assert_ne!(left, removed_id);
            assert_ne!(right, removed_id);
        }
    }

    #[test]
    fn removing_an_end_clears_dangling_marker() {
        let proj = Planar::default();
        let mut chain = Chain::from_shape(&line(3), false, &proj);
        chain.remove_at(0, 0, &proj).unwrap();
        let first = chain.vertex_at(0, 0).unwrap();
        assert_eq!(chain.vertex(first).unwrap().middle_left(), None);
        assert_eq!(chain.vertex(first).unwrap().prev(), None);
        assert_consistent(&chain);
    }

    #[test]
    fn closed_pair_shrinks_to_lone_vertex() {
        let proj = Planar::default();
        let mut chain = Chain::from_shape(&line(2), true, &proj);
        chain.remove_at(0, 1, &proj).unwrap();
        let lone = chain.vertex(chain.vertex_at(0, 0).unwrap()).unwrap();
        assert_eq!((lone.prev(), lone.next()), (None, None));
        assert_eq!((lone.middle_left(), lone.middle_right()), (None, None));
        assert_eq!(chain.middle_markers().count(), 0);
    }

    #[test]
    fn removal_without_markers_creates_none() {
        let proj = Planar::default();
        let mut chain = Chain::new(false);
        for i in 0..3 {
            chain.push(0, gp(0.0, i as f64)).unwrap();
        }
        chain.remove_at(0, 1, &proj).unwrap();
        assert_eq!(chain.middle_markers().count(), 0);
    }

    #[test]
    fn promote_interior_marker() {
        let proj = Planar::default();
        let mut chain = Chain::from_shape(&line(3), false, &proj);
        let right = chain.vertex_at(0, 1).unwrap();
        let marker = chain.vertex(right).unwrap().middle_left().unwrap();

        assert_eq!(chain.promote_middle_marker(marker, &proj), Some(1));
        assert_eq!(chain.vertex_at(0, 1), Some(marker));
        assert_eq!(chain.positions(0)[1], gp(0.0, 5.0));
        assert_eq!(chain.ring_len(0), 4);
        assert_consistent(&chain);
        // A real vertex cannot be promoted again.
        assert_eq!(chain.promote_middle_marker(marker, &proj), None);
    }

    #[test]
    fn promote_wrap_marker_goes_first() {
        let proj = Planar::default();
        let mut chain = Chain::from_shape(&line(3), true, &proj);
        let first = chain.vertex_at(0, 0).unwrap();
        let wrap = chain.vertex(first).unwrap().middle_left().unwrap();

        assert_eq!(chain.promote_middle_marker(wrap, &proj), Some(0));
        assert_eq!(chain.vertex_at(0, 0), Some(wrap));
        assert_eq!(chain.vertex_at(0, 1), Some(first));
        assert_consistent(&chain);
    }

    #[test]
    fn move_recentres_markers() {
        let proj = Planar::default();
        let mut chain = Chain::from_shape(&line(3), false, &proj);
        let mid = chain.vertex_at(0, 1).unwrap();
        assert!(chain.move_vertex(mid, gp(10.0, 10.0), &proj));

        let v = chain.vertex(mid).unwrap();
        let left = chain.vertex(v.middle_left().unwrap()).unwrap().position();
        let right = chain.vertex(v.middle_right().unwrap()).unwrap().position();
        assert_eq!(left, gp(5.0, 5.0));
        assert_eq!(right, gp(5.0, 15.0));
    }

    #[test]
    fn nested_rings_keep_separate_indices() {
        let proj = Planar::default();
        let shape = Shape::Nested(vec![
            vec![gp(0.0, 0.0), gp(0.0, 10.0), gp(10.0, 10.0), gp(10.0, 0.0)],
            vec![gp(2.0, 2.0), gp(2.0, 4.0), gp(4.0, 4.0)],
        ]);
        let mut chain = Chain::from_shape(&shape, true, &proj);
        assert_eq!(chain.middle_markers().count(), 7);

        chain.remove_at(1, 0, &proj).unwrap();
        assert_eq!(chain.ring_len(0), 4);
        assert_eq!(chain.ring_len(1), 2);
        let v = chain.vertex(chain.vertex_at(1, 0).unwrap()).unwrap();
        assert_eq!(v.nest_index(), Some(1));
        assert_consistent(&chain);
        assert_eq!(chain.to_shape().rings()[0], shape.rings()[0]);
    }

    #[test]
    fn rebuild_invalidates_ids() {
        let proj = Planar::default();
        let mut chain = Chain::from_shape(&line(3), false, &proj);
        let old = chain.vertex_at(0, 0).unwrap();
        chain.rebuild(&line(3), &proj);
        assert!(!chain.is_alive(old));
        assert_ne!(chain.vertex_at(0, 0), Some(old));
        assert_eq!(chain.to_shape(), line(3));
    }

    #[test]
    fn hit_test_prefers_real_vertices() {
        let proj = Planar::default();
        let chain = Chain::from_shape(&line(2), false, &proj);
        let first = chain.vertex_at(0, 0).unwrap();
        assert_eq!(chain.hit_test(Point::new(1.0, 0.0), 4.0, &proj), Some(first));

        let marker = chain.middle_markers().next().unwrap();
        assert_eq!(chain.hit_test(Point::new(5.0, 1.0), 4.0, &proj), Some(marker));
        assert_eq!(chain.hit_test(Point::new(5.0, 9.0), 4.0, &proj), None);
    }
}
