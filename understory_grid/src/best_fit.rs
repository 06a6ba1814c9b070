// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Best-fit search: from a drop point and a footprint to a top-left cell.
//!
//! The touched cell is the one under the drop point. Every origin whose
//! footprint would still cover the touched cell is a candidate, so the pointer
//! may be anywhere inside the item's shadow rather than only at its top-left
//! corner. Candidates that leave the grid (or touch an excluded cell) are
//! discarded, and the survivor whose footprint centroid is nearest to the drop
//! point wins. Equal distances keep the first candidate in enumeration order,
//! which is `dy` outer and `dx` inner, both counting up from zero.

use kurbo::Point;

use crate::cells::{GridCell, footprint_rect};
use crate::occupancy::Occupancy;
use crate::types::{CellCoord, Footprint, GridSpec, SurfaceBounds};

/// Returns the top-left cell of the best legal placement of `footprint` for a
/// drop at `drop_point`, or `None` if the point is outside every cell or no
/// placement fits.
///
/// `cells` must be the output of [`compute_cells`](crate::compute_cells) for
/// `spec` and `bounds`. When `occupied` is given, candidates overlapping any of
/// its cells are rejected as well.
#[must_use]
pub fn find_best_origin(
    drop_point: Point,
    footprint: Footprint,
    cells: &[GridCell],
    spec: GridSpec,
    bounds: SurfaceBounds,
    occupied: Option<&Occupancy>,
) -> Option<CellCoord> {
    let touched = cells.iter().find(|cell| cell.rect.contains(drop_point))?;
    let touched = spec.coord_of(touched.index)?;

    let mut best: Option<(CellCoord, f64)> = None;
    for dy in 0..footprint.height() {
        for dx in 0..footprint.width() {
            let (Some(row), Some(col)) = (touched.row.checked_sub(dy), touched.col.checked_sub(dx))
            else {
                continue;
            };
            let origin = CellCoord::new(row, col);
            let Some(indices) = footprint.indices_at(origin, spec) else {
                continue;
            };
            if occupied.is_some_and(|occ| occ.any_occupied(&indices)) {
                continue;
            }
            let centroid = footprint_rect(spec, bounds, origin, footprint).center();
            let distance = (centroid - drop_point).hypot2();
            if best.is_none_or(|(_, nearest)| distance < nearest) {
                best = Some((origin, distance));
            }
        }
    }
    best.map(|(origin, _)| origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::compute_cells;
    use crate::types::SizeCategory;
    use kurbo::Size;

    fn grid_4x4() -> (GridSpec, SurfaceBounds) {
        (
            GridSpec::new(4, 4).unwrap(),
            SurfaceBounds::new(Point::ORIGIN, Size::new(400.0, 400.0)),
        )
    }

    fn best(point: Point, footprint: Footprint, occupied: Option<&Occupancy>) -> Option<CellCoord> {
        let (spec, bounds) = grid_4x4();
        let cells = compute_cells(spec, bounds);
        find_best_origin(point, footprint, &cells, spec, bounds, occupied)
    }

    #[test]
    fn unit_footprint_lands_on_touched_cell() {
        assert_eq!(
            best(Point::new(250.0, 50.0), Footprint::UNIT, None),
            Some(CellCoord::new(0, 2))
        );
    }

    #[test]
    fn equidistant_candidates_keep_enumeration_order() {
        // Centroids of (1,1) and (1,0) are (200,150) and (100,150): both 50 away.
        let wide = SizeCategory::Wide.footprint();
        assert_eq!(
            best(Point::new(150.0, 150.0), wide, None),
            Some(CellCoord::new(1, 1))
        );
    }

    #[test]
    fn nearest_centroid_wins() {
        let wide = SizeCategory::Wide.footprint();
        // Left half of cell (1,1): the (1,0) placement is centered at x=100.
        assert_eq!(
            best(Point::new(110.0, 150.0), wide, None),
            Some(CellCoord::new(1, 0))
        );
        // Right half: the (1,1) placement is centered at x=200.
        assert_eq!(
            best(Point::new(190.0, 150.0), wide, None),
            Some(CellCoord::new(1, 1))
        );
    }

    #[test]
    fn large_item_snaps_inside_grid_at_corner() {
        let large = SizeCategory::Large.footprint();
        // Bottom-right cell: only the origin (2,2) keeps the item on the grid.
        assert_eq!(
            best(Point::new(395.0, 395.0), large, None),
            Some(CellCoord::new(2, 2))
        );
        // Top-left cell: only (0,0) is legal.
        assert_eq!(
            best(Point::new(5.0, 5.0), large, None),
            Some(CellCoord::new(0, 0))
        );
    }

    #[test]
    fn drop_outside_grid_has_no_result() {
        assert_eq!(best(Point::new(-1.0, 10.0), Footprint::UNIT, None), None);
        assert_eq!(best(Point::new(400.0, 10.0), Footprint::UNIT, None), None);
    }

    #[test]
    fn footprint_larger_than_grid_has_no_result() {
        let huge = Footprint::new(5, 1).unwrap();
        assert_eq!(best(Point::new(50.0, 50.0), huge, None), None);
    }

    #[test]
    fn occupied_cells_exclude_candidates() {
        let wide = SizeCategory::Wide.footprint();
        // Cell 7 is (1,3); it blocks the (1,2) placement covering 6 and 7.
        let occ: Occupancy = [7].into_iter().collect();
        assert_eq!(
            best(Point::new(290.0, 150.0), wide, Some(&occ)),
            Some(CellCoord::new(1, 1))
        );

        let full: Occupancy = [5, 6].into_iter().collect();
        assert_eq!(best(Point::new(250.0, 150.0), wide, Some(&full)), None);
    }
}
