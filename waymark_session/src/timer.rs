// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot deferred actions driven by host time.
//!
//! Sessions never run timers themselves. A [`Deferred`] only stores a
//! deadline; the session checks it whenever the host calls `poll(now)` or
//! delivers an event (which carries its own timestamp). Arming replaces any
//! pending deadline, so at most one action per slot is ever outstanding.

/// One cancellable pending action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deferred {
    deadline: Option<u64>,
}

impl Deferred {
    /// Arm the slot to fire `delay_ms` after `now`, replacing any pending action.
    ///
    /// Returns whether a pending action was cancelled.
    pub fn arm(&mut self, now: u64, delay_ms: u64) -> bool {
        self.deadline.replace(now.saturating_add(delay_ms)).is_some()
    }

    /// Cancel the pending action. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Whether an action is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Deadline of the pending action.
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Returns `true` exactly once when `now` reaches the deadline, clearing the slot.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// The timed error indicator of a session.
///
/// Showing the indicator (re)arms its hide timer; the indicator clears when
/// the timer fires or when the next valid action hides it early.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ErrorIndicator {
    shown: bool,
    timer: Deferred,
}

impl ErrorIndicator {
    /// Whether the indicator is currently shown.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Show the indicator until `now + timeout_ms`.
    pub fn show(&mut self, now: u64, timeout_ms: u64) {
        self.shown = true;
        self.timer.arm(now, timeout_ms);
    }

    /// Hide the indicator early. Returns whether it was shown.
    pub fn hide(&mut self) -> bool {
        self.timer.cancel();
        core::mem::take(&mut self.shown)
    }

    /// Hide the indicator if its timeout has passed. Returns whether it was hidden.
    pub fn poll(&mut self, now: u64) -> bool {
        if self.timer.fire(now) {
            log::trace!("error indicator timed out at {now}");
            core::mem::take(&mut self.shown)
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_deadline() {
        let mut d = Deferred::default();
        assert!(!d.arm(100, 50));
        assert!(!d.fire(149));
        assert!(d.fire(150));
        assert!(!d.fire(500));
        assert!(!d.is_pending());
    }

    #[test]
    fn rearming_replaces_pending() {
        let mut d = Deferred::default();
        d.arm(0, 100);
        assert!(d.arm(50, 100));
        assert!(!d.fire(120));
        assert_eq!(d.deadline(), Some(150));
        assert!(d.cancel());
        assert!(!d.cancel());
    }

    #[test]
    fn indicator_clears_on_timeout_or_hide() {
        let mut e = ErrorIndicator::default();
        e.show(0, 2500);
        assert!(e.is_shown());
        assert!(!e.poll(2499));
        assert!(e.poll(2500));
        assert!(!e.is_shown());

        e.show(3000, 2500);
        assert!(e.hide());
        assert!(!e.hide());
        // A stale deadline cannot clear a later indicator.
        assert!(!e.poll(5500));
    }
}
