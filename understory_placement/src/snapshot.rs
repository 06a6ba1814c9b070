// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-data export of a session's persistent state.
//!
//! The grid spec and the placed items are all that must survive a restart.
//! A [`Snapshot`] holds exactly that and nothing else (no drag state, no
//! pending damage), so any serialization format can store it. Enable the
//! `serde` feature to derive `Serialize`/`Deserialize`.

use alloc::vec::Vec;

use understory_grid::{CellCoord, GridSpec};

use crate::item::ItemId;

/// One placed item as plain data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRecord<P> {
    /// Identifier, preserved on restore.
    pub id: ItemId,
    /// Caller payload.
    pub payload: P,
    /// Top-left cell.
    pub origin: CellCoord,
    /// Occupied cell indices, ascending.
    pub cells: Vec<usize>,
}

/// The persistent state of a placement session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<P> {
    /// The active grid density.
    pub spec: GridSpec,
    /// Placed items in placement order.
    pub items: Vec<ItemRecord<P>>,
}
