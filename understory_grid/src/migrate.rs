// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Density migration: remapping cells when a surface's [`GridSpec`] changes.
//!
//! Positions are rescaled proportionally with integer division,
//! `new_row = row * new_rows / old_rows` and likewise for columns, so a change
//! by an exact multiple round-trips.
//!
//! Two granularities are offered:
//!
//! - [`migrate_indices`] remaps every occupied index independently. A
//!   multi-cell item may come out non-rectangular (or collapse onto fewer
//!   cells) because each index moves on its own.
//! - [`migrate_origin`] remaps an item's origin as a unit and keeps its
//!   footprint, shifting it back inside the grid if the rescaled origin would
//!   push it over an edge. The cell set is then recomputed from the new spec.

use alloc::collections::BTreeSet;

use crate::types::{CellCoord, Footprint, GridSpec};

/// Rescales `coord` from `old` to `new` proportionally.
///
/// `coord` must lie inside `old`; the result then lies inside `new`.
#[must_use]
pub fn migrate_coord(coord: CellCoord, old: GridSpec, new: GridSpec) -> CellCoord {
    debug_assert!(old.contains(coord), "coordinate outside the source grid");
    CellCoord::new(
        scale(coord.row, old.rows(), new.rows()),
        scale(coord.col, old.columns(), new.columns()),
    )
}

fn scale(value: usize, from: usize, to: usize) -> usize {
    // `value < from`, so the exact result is below `to`; widen to avoid overflow.
    let scaled = value as u128 * to as u128 / from as u128;
    usize::try_from(scaled).unwrap_or(usize::MAX)
}

/// Remaps each index in `old_indices` from `old` to `new`.
///
/// The result is de-duplicated and ascending. Indices that are not valid in
/// `old`, or whose remapped index falls outside `new`, are dropped. When the
/// specs are equal the input is returned unchanged (apart from ordering and
/// de-duplication).
pub fn migrate_indices<I>(old_indices: I, old: GridSpec, new: GridSpec) -> BTreeSet<usize>
where
    I: IntoIterator<Item = usize>,
{
    if old == new {
        return old_indices.into_iter().collect();
    }
    old_indices
        .into_iter()
        .filter_map(|index| old.coord_of(index))
        .filter_map(|coord| new.index_of(migrate_coord(coord, old, new)))
        .filter(|&index| index < new.cell_count())
        .collect()
}

/// Remaps an item anchored at `origin` with `footprint` from `old` to `new`,
/// preserving its shape.
///
/// Returns `None` if the footprint is larger than `new` in either direction,
/// or if `origin` does not lie inside `old`.
#[must_use]
pub fn migrate_origin(
    origin: CellCoord,
    footprint: Footprint,
    old: GridSpec,
    new: GridSpec,
) -> Option<CellCoord> {
    if !old.contains(origin) {
        return None;
    }
    let max_row = new.rows().checked_sub(footprint.height())?;
    let max_col = new.columns().checked_sub(footprint.width())?;
    let scaled = if old == new {
        origin
    } else {
        migrate_coord(origin, old, new)
    };
    Some(CellCoord::new(scaled.row.min(max_row), scaled.col.min(max_col)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn spec(rows: usize, columns: usize) -> GridSpec {
        GridSpec::new(rows, columns).unwrap()
    }

    fn sorted(set: BTreeSet<usize>) -> Vec<usize> {
        set.into_iter().collect()
    }

    #[test]
    fn doubling_density_scales_position() {
        assert_eq!(sorted(migrate_indices([5], spec(4, 4), spec(8, 8))), vec![18]);
    }

    #[test]
    fn halving_density_round_trips() {
        assert_eq!(sorted(migrate_indices([18], spec(8, 8), spec(4, 4))), vec![5]);
    }

    #[test]
    fn equal_specs_are_identity() {
        let s = spec(3, 5);
        assert_eq!(sorted(migrate_indices([14, 2, 7], s, s)), vec![2, 7, 14]);
    }

    #[test]
    fn shrinking_merges_duplicates() {
        // 18, 19, 26, 27 form a 2x2 block at (2,2) on 8x8; all land on 5 in 4x4.
        assert_eq!(
            sorted(migrate_indices([18, 19, 26, 27], spec(8, 8), spec(4, 4))),
            vec![5]
        );
    }

    #[test]
    fn per_cell_growth_can_fragment_an_item() {
        // A 2x1 item at (1,1)-(1,2) on 4x4 spreads to (2,2) and (2,4) on 8x8.
        assert_eq!(
            sorted(migrate_indices([5, 6], spec(4, 4), spec(8, 8))),
            vec![18, 20]
        );
    }

    #[test]
    fn invalid_source_indices_are_dropped() {
        assert_eq!(sorted(migrate_indices([16, 3], spec(4, 4), spec(2, 2))), vec![1]);
    }

    #[test]
    fn non_multiple_change_uses_integer_division() {
        // (2,2) on 3x3 → (2*4/3, 2*4/3) = (2,2) on 4x4 → index 10.
        assert_eq!(sorted(migrate_indices([8], spec(3, 3), spec(4, 4))), vec![10]);
    }

    #[test]
    fn origin_migration_preserves_shape() {
        let large = Footprint::new(2, 2).unwrap();
        assert_eq!(
            migrate_origin(CellCoord::new(1, 1), large, spec(4, 4), spec(8, 8)),
            Some(CellCoord::new(2, 2))
        );
    }

    #[test]
    fn origin_migration_clamps_into_grid() {
        let large = Footprint::new(2, 2).unwrap();
        // (6,6) on 8x8 rescales to (3,3), which clamps back to (2,2).
        assert_eq!(
            migrate_origin(CellCoord::new(6, 6), large, spec(8, 8), spec(4, 4)),
            Some(CellCoord::new(2, 2))
        );
    }

    #[test]
    fn origin_migration_rejects_oversized_footprints() {
        let wide = Footprint::new(3, 1).unwrap();
        assert_eq!(
            migrate_origin(CellCoord::new(0, 0), wide, spec(4, 4), spec(2, 2)),
            None
        );
        assert_eq!(
            migrate_origin(CellCoord::new(4, 0), Footprint::UNIT, spec(4, 4), spec(2, 2)),
            None
        );
    }
}
