// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop-target hit testing against a [`DragState`].
//!
//! Containment is checked against the drag's resolved position
//! (`origin + live_offset`). A target may [`hovering`] while the gesture is
//! active to drive a highlight, but the payload is only exposed by [`resolve`]
//! once the gesture has been released and nobody has consumed it yet.
//!
//! [`claim`] combines the check with consumption, so the first target to
//! claim a payload is the only one that gets it even when target bounds
//! overlap.

use kurbo::Rect;

use crate::drag::DragState;

/// Whether the drag is in progress and currently over `target`.
pub fn hovering<P>(state: &DragState<P>, target: Rect) -> bool {
    state.is_active() && state.payload().is_some() && target.contains(state.resolved_position())
}

/// The payload a drop on `target` would deliver, if any.
///
/// Returns `Some` only when the resolved position lies inside `target`, the
/// gesture is no longer active, and the payload has not been consumed.
pub fn resolve<P>(state: &DragState<P>, target: Rect) -> Option<&P> {
    if state.is_active() || state.drop_consumed() {
        return None;
    }
    if !target.contains(state.resolved_position()) {
        return None;
    }
    state.payload()
}

/// Takes the payload for `target`, marking the drop as consumed.
///
/// Returns `None` under the same conditions as [`resolve`].
pub fn claim<P>(state: &mut DragState<P>, target: Rect) -> Option<P> {
    resolve(state, target)?;
    state.mark_consumed();
    state.take_payload()
}

/// Offers the released payload to `targets` in order; the first whose bounds
/// contain the resolved position takes it.
///
/// Returns the winning key along with the payload.
pub fn claim_first<K, P, I>(state: &mut DragState<P>, targets: I) -> Option<(K, P)>
where
    I: IntoIterator<Item = (K, Rect)>,
{
    for (key, bounds) in targets {
        if let Some(payload) = claim(state, bounds) {
            return Some((key, payload));
        }
        if state.drop_consumed() || state.payload().is_none() {
            break;
        }
    }
    None
}
