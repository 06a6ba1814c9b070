// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gesture state for moving a payload across a surface.
//!
//! [`DragState`] tracks a single in-flight drag: where the dragged element
//! started, how far the pointer has moved since, what is being carried, and
//! whether a drop target has already taken it.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──start──▶ Dragging ──release──▶ Released ──claim/clear/expire──▶ Idle
//!                     │
//!                     └──cancel──▶ Idle
//! ```
//!
//! - [`DragState::start`] captures the element's position and the payload and
//!   marks the gesture active.
//! - [`DragState::on_move`] accumulates pointer deltas. Every move also resets
//!   the consumed flag, so a drop target can never claim a payload mid-gesture.
//! - [`DragState::release`] ends the gesture but **keeps** the payload and
//!   offset. This leaves a window in which drop targets can evaluate the final
//!   position and claim the payload (see [`crate::drop`]).
//! - [`DragState::cancel`] ends the gesture and discards the payload at once.
//!   Nothing can be claimed after a cancel.
//!
//! The host clears a released payload after it has been claimed, or after a
//! timeout with [`DragState::expire`] if no target wanted it.
//!
//! ## Usage
//!
//! ```
//! use understory_event_state::drag::{DragPhase, DragState};
//! use kurbo::{Point, Vec2};
//!
//! let mut drag: DragState<&str> = DragState::new();
//! drag.start(Point::new(10.0, 10.0), "clock");
//! drag.on_move(Vec2::new(30.0, 0.0));
//! drag.on_move(Vec2::new(20.0, 5.0));
//! assert_eq!(drag.resolved_position(), Point::new(60.0, 15.0));
//!
//! drag.release(1_000);
//! assert_eq!(drag.phase(), DragPhase::Released);
//! assert_eq!(drag.payload(), Some(&"clock"));
//!
//! // Nobody claimed it within 300ms.
//! assert_eq!(drag.expire(1_300, 300), Some("clock"));
//! assert_eq!(drag.phase(), DragPhase::Idle);
//! ```
//!
//! A state value is owned by whoever handles input for one surface and passed
//! by reference to the drop-target checks. It is not meant to be shared across
//! threads; a multi-threaded host should confine it to one event loop or put
//! it behind a single lock, since release and clear are order-sensitive.

use kurbo::{Point, Vec2};

/// Coarse phase of a [`DragState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// No drag and no pending payload.
    Idle,
    /// A gesture is in progress.
    Dragging,
    /// The gesture ended and the payload is waiting to be claimed.
    Released,
}

/// State of a single pointer-driven drag.
#[derive(Clone, Debug)]
pub struct DragState<P> {
    payload: Option<P>,
    origin: Point,
    live_offset: Vec2,
    active: bool,
    drop_consumed: bool,
    released_at: Option<u64>,
}

impl<P> DragState<P> {
    /// Creates an idle drag state.
    pub const fn new() -> Self {
        Self {
            payload: None,
            origin: Point::ORIGIN,
            live_offset: Vec2::ZERO,
            active: false,
            drop_consumed: false,
            released_at: None,
        }
    }

    /// Begins a drag of `payload` from `origin`.
    ///
    /// Any payload still waiting from an earlier release is displaced and
    /// returned, since only one drag can be in flight at a time.
    pub fn start(&mut self, origin: Point, payload: P) -> Option<P> {
        let displaced = self.payload.replace(payload);
        self.origin = origin;
        self.live_offset = Vec2::ZERO;
        self.active = true;
        self.drop_consumed = false;
        self.released_at = None;
        displaced
    }

    /// Adds a pointer movement of `delta` to the live offset.
    ///
    /// Returns `false` (and does nothing) when no gesture is active.
    pub fn on_move(&mut self, delta: Vec2) -> bool {
        if !self.active {
            return false;
        }
        self.live_offset += delta;
        self.drop_consumed = false;
        true
    }

    /// Ends the gesture at `timestamp` (milliseconds), keeping the payload
    /// and offset so drop targets can still see the final position.
    ///
    /// Returns `true` if a gesture was active.
    pub fn release(&mut self, timestamp: u64) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.released_at = Some(timestamp);
        true
    }

    /// Aborts the gesture, discarding the payload unconditionally and resetting
    /// every other field, `origin` included.
    ///
    /// Returns the discarded payload, if there was one, so the caller can put
    /// it back where it came from.
    pub fn cancel(&mut self) -> Option<P> {
        let payload = self.payload.take();
        self.clear();
        payload
    }

    /// Resets every field to the idle state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Marks the released payload as taken by a drop target.
    pub fn mark_consumed(&mut self) {
        self.drop_consumed = true;
    }

    /// Removes and returns the payload, leaving the rest of the state as is.
    pub fn take_payload(&mut self) -> Option<P> {
        self.payload.take()
    }

    /// Discards a released payload nobody claimed within `timeout` ms of the
    /// release, returning it.
    ///
    /// Has no effect while dragging, or if the payload was already consumed.
    pub fn expire(&mut self, now: u64, timeout: u64) -> Option<P> {
        let released_at = self.released_at?;
        if self.active || self.drop_consumed || now.saturating_sub(released_at) < timeout {
            return None;
        }
        let payload = self.payload.take();
        self.clear();
        payload
    }

    /// The dragged element's position when the gesture started.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Accumulated pointer movement since the gesture started.
    pub fn live_offset(&self) -> Vec2 {
        self.live_offset
    }

    /// `origin + live_offset`: where the dragged element currently is.
    pub fn resolved_position(&self) -> Point {
        self.origin + self.live_offset
    }

    /// The payload being dragged or waiting to be claimed.
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a drop target has taken the released payload.
    pub fn drop_consumed(&self) -> bool {
        self.drop_consumed
    }

    /// Timestamp of the last release, while the payload is pending.
    pub fn released_at(&self) -> Option<u64> {
        self.released_at
    }

    /// The current phase.
    pub fn phase(&self) -> DragPhase {
        if self.active {
            DragPhase::Dragging
        } else if self.payload.is_some() {
            DragPhase::Released
        } else {
            DragPhase::Idle
        }
    }
}

impl<P> Default for DragState<P> {
    fn default() -> Self {
        Self::new()
    }
}
