// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by drawing and editing sessions.
//!
//! None of these end a session. User-caused errors also show the session's
//! timed error indicator.

use waymark_chain::VertexId;

/// Why a drawing operation was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    /// The session was not started, or already completed or cancelled.
    #[error("the drawing session is not active")]
    NotActive,
    /// Too few vertices to finish the shape.
    #[error("the shape needs at least {min} vertices, it has {len}")]
    InvalidShape {
        /// Minimum vertex count for the shape kind.
        min: usize,
        /// Vertices placed.
        len: usize,
    },
    /// The vertex or the closing segment would make the shape cross itself.
    #[error("shape edges cannot cross")]
    SelfIntersection,
}

/// Why an editing operation was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// The id does not name a live vertex or middle marker.
    #[error("unknown vertex {0:?}")]
    UnknownVertex(VertexId),
    /// A middle marker was passed where a real vertex is required.
    #[error("{0:?} is a middle marker")]
    MiddleMarker(VertexId),
    /// Another vertex is being dragged.
    #[error("a drag is already in progress")]
    DragInProgress,
    /// The vertex is not the one being dragged.
    #[error("{0:?} is not being dragged")]
    NotDragging(VertexId),
    /// Removal would leave the ring below its minimum.
    #[error("the ring needs at least {min} vertices")]
    TooFewVertices {
        /// Minimum vertex count for the shape kind.
        min: usize,
    },
    /// The drag made the shape cross itself.
    #[error("shape edges cannot cross")]
    SelfIntersection,
}
