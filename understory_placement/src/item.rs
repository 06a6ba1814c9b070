// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placed items and their identifiers.

use core::fmt;

use kurbo::Rect;
use understory_grid::{CellCoord, CellIndices, Footprint, GridSpec, SurfaceBounds, cell_rect};

/// Stable identifier of a placed item within one session.
///
/// An item keeps its identifier when it is picked up and dropped elsewhere,
/// and across density changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub(crate) u64);

impl ItemId {
    /// The raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pending render change for an item, folded into [`crate::Damage`] on commit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Mark {
    Added,
    Moved,
    Reshaped,
}

impl Mark {
    /// Combines an earlier pending mark with a newer one.
    pub(crate) fn merge(earlier: Option<Self>, later: Self) -> Self {
        match (earlier, later) {
            (Some(Self::Added), _) => Self::Added,
            (Some(Self::Reshaped), _) | (_, Self::Reshaped) => Self::Reshaped,
            (_, later) => later,
        }
    }
}

/// An item occupying a set of grid cells.
///
/// Under [`MigrationPolicy::PerItem`](crate::MigrationPolicy::PerItem),
/// `cells` is always the `footprint` rectangle anchored at `origin`. Under
/// [`MigrationPolicy::PerCell`](crate::MigrationPolicy::PerCell) a density change
/// may leave it fragmented; `origin` is then the smallest occupied cell.
#[derive(Clone, Debug)]
pub struct PlacedItem<P> {
    pub(crate) id: ItemId,
    pub(crate) payload: P,
    pub(crate) footprint: Footprint,
    pub(crate) origin: CellCoord,
    pub(crate) cells: CellIndices,
    pub(crate) mark: Option<Mark>,
}

impl<P> PlacedItem<P> {
    /// The item's identifier.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The caller's payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Mutable access to the payload; the placement is unaffected.
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// The footprint the item was placed with.
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// The top-left cell.
    pub fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Occupied cell indices, ascending and non-empty.
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Whether the occupied cells still form the footprint rectangle at `origin`.
    pub fn is_rectangular(&self, spec: GridSpec) -> bool {
        self.footprint
            .indices_at(self.origin, spec)
            .is_some_and(|expected| expected == self.cells)
    }

    /// Smallest rectangle covering every occupied cell.
    pub fn bounding_rect(&self, spec: GridSpec, bounds: SurfaceBounds) -> Rect {
        self.cells
            .iter()
            .filter_map(|&index| spec.coord_of(index))
            .map(|coord| cell_rect(spec, bounds, coord))
            .reduce(|acc, r| acc.union(r))
            .unwrap_or(Rect::ZERO)
    }

    pub(crate) fn consume(self) -> P {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};
    use smallvec::smallvec;

    fn item(origin: CellCoord, cells: CellIndices) -> PlacedItem<()> {
        PlacedItem {
            id: ItemId(1),
            payload: (),
            footprint: Footprint::new(2, 1).unwrap(),
            origin,
            cells,
            mark: None,
        }
    }

    #[test]
    fn marks_merge_toward_heavier_updates() {
        assert_eq!(Mark::merge(None, Mark::Moved), Mark::Moved);
        assert_eq!(Mark::merge(Some(Mark::Added), Mark::Moved), Mark::Added);
        assert_eq!(Mark::merge(Some(Mark::Added), Mark::Reshaped), Mark::Added);
        assert_eq!(Mark::merge(Some(Mark::Moved), Mark::Reshaped), Mark::Reshaped);
        assert_eq!(Mark::merge(Some(Mark::Reshaped), Mark::Moved), Mark::Reshaped);
    }

    #[test]
    fn rectangular_and_bounding_rect() {
        let spec = GridSpec::new(4, 4).unwrap();
        let bounds = SurfaceBounds::new(Point::ORIGIN, Size::new(400.0, 400.0));

        let whole = item(CellCoord::new(1, 1), smallvec![5, 6]);
        assert!(whole.is_rectangular(spec));
        assert_eq!(
            whole.bounding_rect(spec, bounds),
            Rect::new(100.0, 100.0, 300.0, 200.0)
        );

        let split = item(CellCoord::new(1, 1), smallvec![5, 7]);
        assert!(!split.is_rectangular(spec));
        assert_eq!(
            split.bounding_rect(spec, bounds),
            Rect::new(100.0, 100.0, 400.0, 200.0)
        );
    }

    #[test]
    fn id_display() {
        assert_eq!(alloc::format!("{}", ItemId(12)), "#12");
    }
}
