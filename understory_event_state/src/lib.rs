// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: pointer interaction state machines.
//!
//! These are small, pure state holders that a host feeds with pointer samples.
//! They do no hit testing of their own beyond rectangle containment and know
//! nothing about widgets or rendering.
//!
//! - [`intent`]: decides when a press has become a deliberate drag
//!   (long press, then move) as opposed to a tap or a swipe.
//! - [`drag`]: [`DragState`](drag::DragState) tracks one in-flight drag: origin,
//!   live offset, payload, and whether a drop target has taken it.
//! - [`drop`]: drop-target checks over a `DragState`: live hover, payload
//!   resolution after release, and exactly-once claiming.
//!
//! A typical flow feeds raw pointer samples to [`intent::DragIntent`] until it
//! yields a [`intent::DragTrigger`], starts a [`drag::DragState`] from it, feeds
//! move deltas into the state, releases it on pointer up, and offers it to
//! drop targets with [`drop::claim`].
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod drop;
pub mod intent;
