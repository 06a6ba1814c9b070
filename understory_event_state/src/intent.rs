// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag intent recognition: telling a deliberate drag apart from a tap or a swipe.
//!
//! A drag only starts after the pointer has been held still for a while and
//! then moved. This keeps taps (short, stationary) and swipes or scrolls
//! (moving straight away) from picking up items by accident.
//!
//! ## Recognition Rules
//!
//! 1. **Arm**: the press becomes armed once `long_press_ms` has elapsed since
//!    the down event while the pointer stayed within `move_slop` of its down
//!    position. Hosts can observe this with [`DragIntent::poll_long_press`]
//!    (for example to show a "lifted" affordance).
//! 2. **Abort**: moving beyond `move_slop` *before* the press is armed
//!    abandons the press; no drag starts until the next down.
//! 3. **Start**: moving beyond `move_slop` *after* the press is armed emits a
//!    single [`DragTrigger`]. Further moves emit nothing; feed them to
//!    [`DragState`](crate::drag::DragState) instead.
//! 4. **Tap**: releasing without having started never produces a trigger.
//!
//! ```
//! use understory_event_state::intent::{DragIntent, DragIntentConfig};
//! use kurbo::Point;
//!
//! let mut intent: DragIntent<u32> = DragIntent::new(DragIntentConfig::default());
//! intent.on_down(7, Point::new(10.0, 10.0), 0);
//!
//! // Held still past the long-press threshold, then moved.
//! assert_eq!(intent.poll_long_press(600), Some(&7));
//! let trigger = intent.on_move(Point::new(30.0, 10.0), 650).expect("drag should start");
//! assert_eq!(trigger.target, 7);
//! assert_eq!(trigger.down_position, Point::new(10.0, 10.0));
//! ```

use kurbo::Point;

/// Thresholds for recognizing a deliberate drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragIntentConfig {
    /// How long the pointer must be held before a move counts as a drag (milliseconds).
    pub long_press_ms: u64,
    /// Distance the pointer may wander while held without counting as movement.
    pub move_slop: f64,
}

impl DragIntentConfig {
    /// Returns this config with a different long-press duration.
    #[must_use]
    pub const fn with_long_press_ms(mut self, long_press_ms: u64) -> Self {
        self.long_press_ms = long_press_ms;
        self
    }

    /// Returns this config with a different movement slop.
    #[must_use]
    pub const fn with_move_slop(mut self, move_slop: f64) -> Self {
        self.move_slop = move_slop;
        self
    }
}

impl Default for DragIntentConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 500,
            move_slop: 4.0,
        }
    }
}

/// Emitted once when a held press turns into a drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragTrigger<K> {
    /// What was pressed.
    pub target: K,
    /// Pointer position at the down event.
    pub down_position: Point,
    /// Pointer position of the move that started the drag.
    pub position: Point,
}

#[derive(Clone, Debug)]
struct Pending<K> {
    target: K,
    down_position: Point,
    down_time: u64,
    armed: bool,
    started: bool,
}

/// Long-press-then-move recognizer for a single pointer.
#[derive(Clone, Debug)]
pub struct DragIntent<K> {
    config: DragIntentConfig,
    pending: Option<Pending<K>>,
}

impl<K: Clone> DragIntent<K> {
    /// Creates a recognizer with the given thresholds.
    pub fn new(config: DragIntentConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    /// The thresholds in use.
    pub fn config(&self) -> DragIntentConfig {
        self.config
    }

    /// Records a pointer down on `target`.
    pub fn on_down(&mut self, target: K, position: Point, timestamp: u64) {
        self.pending = Some(Pending {
            target,
            down_position: position,
            down_time: timestamp,
            armed: false,
            started: false,
        });
    }

    /// Arms the press if it has been held long enough.
    ///
    /// Returns the pressed target the first time the press becomes armed.
    pub fn poll_long_press(&mut self, now: u64) -> Option<&K> {
        let long_press_ms = self.config.long_press_ms;
        let pending = self.pending.as_mut()?;
        if pending.armed || now.saturating_sub(pending.down_time) < long_press_ms {
            return None;
        }
        pending.armed = true;
        Some(&pending.target)
    }

    /// Processes a pointer move, returning a trigger if this move starts a drag.
    pub fn on_move(&mut self, position: Point, timestamp: u64) -> Option<DragTrigger<K>> {
        let config = self.config;
        let pending = self.pending.as_mut()?;
        if pending.started {
            return None;
        }

        let moved = pending.down_position.distance(position) > config.move_slop;
        if !pending.armed {
            if timestamp.saturating_sub(pending.down_time) >= config.long_press_ms {
                pending.armed = true;
            } else if moved {
                // Moved too early: a swipe or scroll, not a drag.
                self.pending = None;
                return None;
            }
        }

        if pending.armed && moved {
            pending.started = true;
            return Some(DragTrigger {
                target: pending.target.clone(),
                down_position: pending.down_position,
                position,
            });
        }
        None
    }

    /// Records a pointer up, returning `true` if the press had become a drag.
    pub fn on_up(&mut self) -> bool {
        self.pending.take().is_some_and(|p| p.started)
    }

    /// Abandons any pending press.
    ///
    /// Returns `true` if a press was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether a press is pending (held, armed, or dragging).
    pub fn is_pressed(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the pending press has been held long enough to start a drag.
    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| p.armed)
    }

    /// Whether the pending press has turned into a drag.
    pub fn is_dragging(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| p.started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent() -> DragIntent<u32> {
        DragIntent::new(DragIntentConfig::default())
    }

    #[test]
    fn tap_never_triggers() {
        let mut state = intent();
        state.on_down(1, Point::new(0.0, 0.0), 1000);
        assert!(state.on_move(Point::new(1.0, 1.0), 1050).is_none());
        assert!(!state.on_up());
        assert!(!state.is_pressed());
    }

    #[test]
    fn early_movement_aborts() {
        let mut state = intent();
        state.on_down(1, Point::new(0.0, 0.0), 1000);
        assert!(state.on_move(Point::new(20.0, 0.0), 1100).is_none());
        assert!(!state.is_pressed());
        // Holding afterwards does not revive it.
        assert!(state.on_move(Point::new(40.0, 0.0), 2000).is_none());
    }

    #[test]
    fn hold_then_move_triggers_once() {
        let mut state = intent();
        state.on_down(9, Point::new(10.0, 20.0), 1000);
        assert!(state.on_move(Point::new(11.0, 21.0), 1200).is_none(), "within slop");

        let trigger = state.on_move(Point::new(40.0, 20.0), 1600).unwrap();
        assert_eq!(trigger.target, 9);
        assert_eq!(trigger.down_position, Point::new(10.0, 20.0));
        assert_eq!(trigger.position, Point::new(40.0, 20.0));
        assert!(state.is_dragging());

        assert!(state.on_move(Point::new(80.0, 20.0), 1700).is_none());
        assert!(state.on_up());
    }

    #[test]
    fn poll_arms_exactly_once() {
        let mut state = intent();
        state.on_down(3, Point::new(0.0, 0.0), 0);
        assert_eq!(state.poll_long_press(499), None);
        assert!(!state.is_armed());
        assert_eq!(state.poll_long_press(500), Some(&3));
        assert!(state.is_armed());
        assert_eq!(state.poll_long_press(900), None);

        // Armed presses may move immediately.
        assert!(state.on_move(Point::new(10.0, 0.0), 510).is_some());
    }

    #[test]
    fn custom_thresholds() {
        let config = DragIntentConfig::default()
            .with_long_press_ms(100)
            .with_move_slop(0.5);
        let mut state: DragIntent<u32> = DragIntent::new(config);
        state.on_down(1, Point::new(0.0, 0.0), 0);
        assert!(state.on_move(Point::new(1.0, 0.0), 100).is_some());
    }

    #[test]
    fn cancel_clears_pending_press() {
        let mut state = intent();
        assert!(!state.cancel());
        state.on_down(1, Point::new(0.0, 0.0), 0);
        assert!(state.cancel());
        assert!(state.on_move(Point::new(50.0, 0.0), 1000).is_none());
    }
}
