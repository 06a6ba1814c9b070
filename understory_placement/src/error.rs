// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for placement sessions.

use understory_grid::GridError;

use crate::item::ItemId;

/// Why a placement operation did not happen.
///
/// None of these are faults: the session is left in a consistent state and the
/// caller decides whether to tell the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// A drop or move was requested with no drag in progress.
    #[error("no drag in progress")]
    NothingToDrop,
    /// The item does not fit anywhere around the drop point.
    #[error("no legal placement at the drop point")]
    OutOfBounds,
    /// No placed item has this identifier.
    #[error("unknown item {0}")]
    UnknownItem(ItemId),
    /// A restored item lies outside the restored grid.
    #[error("item {0} does not fit the snapshot's grid")]
    InvalidSnapshot(ItemId),
    /// Every item identifier has been handed out.
    #[error("no item identifiers left")]
    IdsExhausted,
    /// A density change was requested with invalid dimensions.
    #[error(transparent)]
    Grid(#[from] GridError),
}
