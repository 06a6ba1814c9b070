// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell rectangles for a [`GridSpec`] applied to [`SurfaceBounds`].
//!
//! All cells share one width and one height: the surface extent divided by the
//! column and row counts, with no remainder redistribution. Cell edges are
//! computed from the same expression on both sides of a boundary, so adjacent
//! cells share edges exactly and the cells tile the surface without gaps.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::types::{CellCoord, Footprint, GridSpec, SurfaceBounds};

/// One cell of a grid, in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCell {
    /// Row-major index, `row * columns + col`.
    pub index: usize,
    /// The cell's rectangle.
    pub rect: Rect,
}

impl GridCell {
    /// The cell's row and column under `spec`.
    ///
    /// `spec` must be the spec the cell was computed from.
    #[must_use]
    pub fn coord(&self, spec: GridSpec) -> CellCoord {
        CellCoord::new(self.index / spec.columns(), self.index % spec.columns())
    }
}

/// Edge `i` along one axis.
#[inline]
fn edge(origin: f64, extent: f64, i: usize) -> f64 {
    origin + i as f64 * extent
}

/// Divides `bounds` into `spec.rows() × spec.columns()` cells in row-major order.
#[must_use]
pub fn compute_cells(spec: GridSpec, bounds: SurfaceBounds) -> Vec<GridCell> {
    let mut cells = Vec::with_capacity(spec.cell_count());
    for row in 0..spec.rows() {
        for col in 0..spec.columns() {
            let coord = CellCoord::new(row, col);
            cells.push(GridCell {
                index: row * spec.columns() + col,
                rect: cell_rect(spec, bounds, coord),
            });
        }
    }
    cells
}

/// The rectangle of the cell at `coord`.
///
/// Coordinates outside the grid extrapolate past the surface edge.
#[must_use]
pub fn cell_rect(spec: GridSpec, bounds: SurfaceBounds, coord: CellCoord) -> Rect {
    footprint_rect(spec, bounds, coord, Footprint::UNIT)
}

/// The rectangle covered by `footprint` anchored at `origin`.
#[must_use]
pub fn footprint_rect(
    spec: GridSpec,
    bounds: SurfaceBounds,
    origin: CellCoord,
    footprint: Footprint,
) -> Rect {
    let cell = bounds.cell_size(spec);
    let Point { x, y } = bounds.position;
    Rect::new(
        edge(x, cell.width, origin.col),
        edge(y, cell.height, origin.row),
        edge(x, cell.width, origin.col + footprint.width()),
        edge(y, cell.height, origin.row + footprint.height()),
    )
}

/// Finds the slot along one axis whose half-open span contains `value`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "The quotient is non-negative and clamped to the slot count before use."
)]
fn axis_slot(value: f64, origin: f64, extent: f64, count: usize) -> Option<usize> {
    let t = (value - origin) / extent;
    if t.is_nan() || t < 0.0 {
        return None;
    }
    let mut i = (t as usize).min(count - 1);
    // Division and multiplication can disagree by one ulp near an edge.
    if value < edge(origin, extent, i) && i > 0 {
        i -= 1;
    } else if value >= edge(origin, extent, i + 1) && i + 1 < count {
        i += 1;
    }
    (edge(origin, extent, i) <= value && value < edge(origin, extent, i + 1)).then_some(i)
}

/// The cell whose rectangle contains `point`, or `None` if the point is outside
/// the surface.
///
/// This agrees with scanning [`compute_cells`] for the rectangle that
/// contains `point`, without building the cell list.
#[must_use]
pub fn cell_at_point(spec: GridSpec, bounds: SurfaceBounds, point: Point) -> Option<CellCoord> {
    let cell = bounds.cell_size(spec);
    if !(cell.width > 0.0 && cell.height > 0.0) {
        return None;
    }
    let col = axis_slot(point.x, bounds.position.x, cell.width, spec.columns())?;
    let row = axis_slot(point.y, bounds.position.y, cell.height, spec.rows())?;
    Some(CellCoord::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    fn square(side: f64) -> SurfaceBounds {
        SurfaceBounds::new(Point::ORIGIN, Size::new(side, side))
    }

    #[test]
    fn four_by_four_over_four_hundred() {
        let spec = GridSpec::new(4, 4).unwrap();
        let cells = compute_cells(spec, square(400.0));
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[5].index, 5);
        assert_eq!(cells[5].rect, Rect::new(100.0, 100.0, 200.0, 200.0));
        assert_eq!(cells[5].coord(spec), CellCoord::new(1, 1));
    }

    #[test]
    fn cells_start_at_surface_position() {
        let spec = GridSpec::new(2, 3).unwrap();
        let bounds = SurfaceBounds::new(Point::new(50.0, 10.0), Size::new(300.0, 100.0));
        let cells = compute_cells(spec, bounds);
        assert_eq!(cells[0].rect, Rect::new(50.0, 10.0, 150.0, 60.0));
        assert_eq!(cells[5].rect, Rect::new(250.0, 60.0, 350.0, 110.0));
    }

    #[test]
    fn adjacent_cells_share_edges() {
        let spec = GridSpec::new(3, 7).unwrap();
        let bounds = SurfaceBounds::new(Point::new(0.3, 0.7), Size::new(101.0, 33.3));
        let cells = compute_cells(spec, bounds);
        for pair in cells.windows(2) {
            if pair[0].coord(spec).row == pair[1].coord(spec).row {
                assert_eq!(pair[0].rect.x1, pair[1].rect.x0, "columns must tile");
            }
        }
        for col in 0..spec.columns() {
            assert_eq!(cells[col].rect.y1, cells[col + 7].rect.y0, "rows must tile");
        }
    }

    #[test]
    fn footprint_rect_spans_cells() {
        let spec = GridSpec::new(4, 4).unwrap();
        let rect = footprint_rect(
            spec,
            square(400.0),
            CellCoord::new(1, 0),
            Footprint::new(2, 1).unwrap(),
        );
        assert_eq!(rect, Rect::new(0.0, 100.0, 200.0, 200.0));
    }

    #[test]
    fn cell_at_point_matches_scan() {
        let spec = GridSpec::new(5, 3).unwrap();
        let bounds = SurfaceBounds::new(Point::new(-7.0, 3.0), Size::new(91.0, 47.0));
        let cells = compute_cells(spec, bounds);
        for i in 0_i32..40 {
            for j in 0_i32..40 {
                let pt = Point::new(-10.0 + f64::from(i) * 2.5, f64::from(j) * 1.3);
                let scanned = cells
                    .iter()
                    .find(|c| c.rect.contains(pt))
                    .map(|c| c.coord(spec));
                assert_eq!(cell_at_point(spec, bounds, pt), scanned, "mismatch at {pt:?}");
            }
        }
    }

    #[test]
    fn far_edges_are_exclusive() {
        let spec = GridSpec::new(4, 4).unwrap();
        let bounds = square(400.0);
        assert_eq!(
            cell_at_point(spec, bounds, Point::new(100.0, 100.0)),
            Some(CellCoord::new(1, 1))
        );
        assert_eq!(cell_at_point(spec, bounds, Point::new(400.0, 10.0)), None);
        assert_eq!(cell_at_point(spec, bounds, Point::new(10.0, -0.1)), None);
        assert_eq!(cell_at_point(spec, bounds, Point::new(f64::NAN, 1.0)), None);
    }

    #[test]
    fn degenerate_surface_has_no_hits() {
        let spec = GridSpec::new(2, 2).unwrap();
        let flat = SurfaceBounds::new(Point::ORIGIN, Size::new(100.0, 0.0));
        assert_eq!(cell_at_point(spec, flat, Point::new(10.0, 0.0)), None);
    }
}
