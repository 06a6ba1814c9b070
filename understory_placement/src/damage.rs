// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage summary types returned from [`PlacementSession::commit`](crate::PlacementSession::commit).

use alloc::vec::Vec;

use crate::item::{ItemId, Mark};

/// How a renderer should refresh one item.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// Build the item's presentation from scratch: it is new, or its size on
    /// screen changed.
    Rebuild,
    /// Reposition the existing presentation; its shape is unchanged.
    Partial,
}

impl Mark {
    /// Resolves a pending mark to the one strategy a renderer should apply.
    pub(crate) fn strategy(self) -> UpdateStrategy {
        match self {
            Self::Added | Self::Reshaped => UpdateStrategy::Rebuild,
            Self::Moved => UpdateStrategy::Partial,
        }
    }
}

/// Changes since the previous commit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Damage {
    /// Items to refresh, each with exactly one strategy, in placement order.
    pub updates: Vec<(ItemId, UpdateStrategy)>,
    /// Items that were committed before and are gone now.
    pub removed: Vec<ItemId>,
}

impl Damage {
    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.removed.is_empty()
    }

    /// The strategy recorded for `id`, if it changed.
    pub fn strategy_for(&self, id: ItemId) -> Option<UpdateStrategy> {
        self.updates
            .iter()
            .find_map(|&(item, strategy)| (item == id).then_some(strategy))
    }
}
