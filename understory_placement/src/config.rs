// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session configuration.

/// How placed items are carried across a density change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MigrationPolicy {
    /// Rescale each item's origin and rebuild its cells from its footprint.
    ///
    /// Items keep their shape. An item is removed only if its footprint is
    /// larger than the new grid. Shrinking can leave items overlapping, since
    /// rescaled origins are not checked against each other.
    #[default]
    PerItem,
    /// Rescale every occupied cell independently.
    ///
    /// Multi-cell items may become fragmented or shrink onto fewer cells; the
    /// origin becomes the item's smallest remaining index.
    PerCell,
}

/// Tunables for a [`PlacementSession`](crate::PlacementSession).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long a payload released outside the surface stays claimable by other
    /// drop targets (milliseconds). `None` keeps it until the next drag starts.
    pub claim_timeout_ms: Option<u64>,
    /// How items move when the grid density changes.
    pub migration: MigrationPolicy,
    /// Whether drops and [`place_at`](crate::PlacementSession::place_at) avoid
    /// cells already taken by other items.
    ///
    /// Density changes ignore this setting: migrated items may overlap.
    pub exclude_occupied: bool,
}

impl SessionConfig {
    /// Returns this config with a different claim timeout.
    #[must_use]
    pub const fn with_claim_timeout_ms(mut self, claim_timeout_ms: Option<u64>) -> Self {
        self.claim_timeout_ms = claim_timeout_ms;
        self
    }

    /// Returns this config with a different migration policy.
    #[must_use]
    pub const fn with_migration(mut self, migration: MigrationPolicy) -> Self {
        self.migration = migration;
        self
    }

    /// Returns this config with overlap exclusion switched on or off.
    #[must_use]
    pub const fn with_exclude_occupied(mut self, exclude_occupied: bool) -> Self {
        self.exclude_occupied = exclude_occupied;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            claim_timeout_ms: Some(300),
            migration: MigrationPolicy::PerItem,
            exclude_occupied: true,
        }
    }
}
