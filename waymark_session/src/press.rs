// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Telling a committing click apart from a drag.
//!
//! Map hosts pan the map when the user drags, so a pointer-up only places a
//! vertex when the pointer stayed (almost) still since pointer-down. The
//! comparison uses client (screen) coordinates, since the map underneath may
//! have moved.
//!
//! ```
//! use kurbo::Point;
//! use waymark_session::press::{PressResult, PressState};
//!
//! let mut presses = PressState::with_threshold(9.0);
//!
//! presses.on_down(None, Point::new(100.0, 100.0), 1_000);
//! let result = presses.on_up(None, Point::new(103.0, 104.0), 1_080);
//! assert!(matches!(result, PressResult::Click(_)));
//!
//! presses.on_down(None, Point::new(100.0, 100.0), 2_000);
//! let result = presses.on_up(None, Point::new(140.0, 100.0), 2_300);
//! assert!(matches!(result, PressResult::Suppressed(Some(_))));
//! ```
//!
//! Each pointer is tracked independently; `None` means the primary pointer.

use alloc::collections::BTreeMap;
use core::num::NonZeroU64;

use kurbo::Point;

/// Pointer identifier for tracking multiple concurrent presses.
pub type PointerId = NonZeroU64;

const PRIMARY_POINTER: PointerId = NonZeroU64::MIN;

/// An active (or just released) pointer press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Press {
    /// Client position at press time.
    pub down_position: Point,
    /// Timestamp of the press in milliseconds.
    pub down_time: u64,
}

/// Outcome of releasing a pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PressResult {
    /// The pointer moved less than the threshold: commit.
    Click(Press),
    /// The pointer moved too far, or there was no matching press.
    Suppressed(Option<Press>),
}

impl PressResult {
    /// The released press, whether or not it counted as a click.
    pub fn press(&self) -> Option<Press> {
        match self {
            Self::Click(press) => Some(*press),
            Self::Suppressed(press) => *press,
        }
    }

    /// Whether the release counts as a click.
    pub fn is_click(&self) -> bool {
        matches!(self, Self::Click(_))
    }
}

/// Per-pointer press tracking with a displacement threshold.
#[derive(Clone, Debug)]
pub struct PressState {
    presses: BTreeMap<PointerId, Press>,
    /// Displacement (client pixels) at or beyond which a release is not a click.
    pub threshold: f64,
}

impl PressState {
    /// Create press tracking with the given displacement threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            presses: BTreeMap::new(),
            threshold,
        }
    }

    /// Whether `pointer` is currently pressed.
    pub fn is_pressed(&self, pointer: Option<PointerId>) -> bool {
        self.presses
            .contains_key(&pointer.unwrap_or(PRIMARY_POINTER))
    }

    /// Record a pointer-down.
    pub fn on_down(&mut self, pointer: Option<PointerId>, position: Point, timestamp: u64) {
        let press = Press {
            down_position: position,
            down_time: timestamp,
        };
        self.presses
            .insert(pointer.unwrap_or(PRIMARY_POINTER), press);
    }

    /// Release a pointer and classify the press.
    pub fn on_up(&mut self, pointer: Option<PointerId>, position: Point, timestamp: u64) -> PressResult {
        let Some(press) = self.presses.remove(&pointer.unwrap_or(PRIMARY_POINTER)) else {
            return PressResult::Suppressed(None);
        };
        let moved = press.down_position.distance(position);
        log::trace!(
            "press released after {}ms, moved {moved:.1}px",
            timestamp.saturating_sub(press.down_time)
        );
        if moved < self.threshold {
            PressResult::Click(press)
        } else {
            PressResult::Suppressed(Some(press))
        }
    }

    /// Forget the press of `pointer` without classifying it. Returns whether
    /// one was active.
    pub fn cancel(&mut self, pointer: Option<PointerId>) -> bool {
        self.presses
            .remove(&pointer.unwrap_or(PRIMARY_POINTER))
            .is_some()
    }

    /// Whether no pointer is pressed.
    pub fn is_empty(&self) -> bool {
        self.presses.is_empty()
    }

    /// Forget every active press.
    pub fn clear(&mut self) {
        self.presses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_press_is_forgotten() {
        let mut s = PressState::with_threshold(9.0);
        s.on_down(None, Point::new(0.0, 0.0), 0);
        assert!(s.cancel(None));
        assert!(!s.cancel(None));
        assert!(s.is_empty());
        assert_eq!(s.on_up(None, Point::new(0.0, 0.0), 5), PressResult::Suppressed(None));
    }

    #[test]
    fn threshold_is_strict() {
        let mut s = PressState::with_threshold(9.0);
        s.on_down(None, Point::new(0.0, 0.0), 0);
        assert!(!s.on_up(None, Point::new(9.0, 0.0), 10).is_click());
        s.on_down(None, Point::new(0.0, 0.0), 0);
        assert!(s.on_up(None, Point::new(8.9, 0.0), 10).is_click());
    }

    #[test]
    fn up_without_down_is_suppressed() {
        let mut s = PressState::with_threshold(9.0);
        assert_eq!(s.on_up(None, Point::ZERO, 0), PressResult::Suppressed(None));
    }

    #[test]
    fn pointers_are_independent() {
        let mut s = PressState::with_threshold(9.0);
        let second = PointerId::new(2).expect("non-zero");
        s.on_down(None, Point::new(0.0, 0.0), 0);
        s.on_down(Some(second), Point::new(50.0, 50.0), 5);
        assert!(s.is_pressed(Some(second)));

        let r = s.on_up(Some(second), Point::new(51.0, 50.0), 20);
        assert_eq!(r.press().map(|p| p.down_time), Some(5));
        assert!(s.is_pressed(None));
        assert!(!s.is_pressed(Some(second)));
    }

    #[test]
    fn clear_drops_presses() {
        let mut s = PressState::with_threshold(9.0);
        s.on_down(None, Point::ZERO, 0);
        s.clear();
        assert!(!s.is_pressed(None));
    }
}
