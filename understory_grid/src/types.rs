// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid descriptions, cell coordinates, item footprints, and surface bounds.

use core::num::NonZeroUsize;

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

/// Cell indices covered by one footprint, in ascending (row-major) order.
///
/// Most items span four cells or fewer, so these stay inline.
pub type CellIndices = SmallVec<[usize; 4]>;

/// Errors from constructing grid values with a zero dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A grid was requested with zero rows.
    #[error("grid must have at least one row")]
    ZeroRows,
    /// A grid was requested with zero columns.
    #[error("grid must have at least one column")]
    ZeroColumns,
    /// A footprint was requested with a zero width or height.
    #[error("footprint must span at least one cell in each direction")]
    EmptyFootprint,
    /// A density multiplier of zero was requested.
    #[error("density multiplier must be at least 1")]
    ZeroMultiplier,
    /// The cell count `rows * columns` does not fit in a `usize`.
    #[error("grid has too many cells")]
    TooLarge,
}

/// How a rectangular surface is subdivided into `rows × columns` cells.
///
/// A `GridSpec` is an immutable value: a density change produces a new spec.
/// Both dimensions are non-zero and their product fits in a `usize`, whether
/// the spec was constructed or deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridSpec {
    rows: NonZeroUsize,
    columns: NonZeroUsize,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GridSpec {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            rows: usize,
            columns: usize,
        }
        let raw = <Raw as serde::Deserialize<'de>>::deserialize(deserializer)?;
        Self::new(raw.rows, raw.columns).map_err(serde::de::Error::custom)
    }
}

impl GridSpec {
    /// Creates a grid spec, rejecting zero rows or columns and grids whose
    /// cell count overflows.
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        let rows = NonZeroUsize::new(rows).ok_or(GridError::ZeroRows)?;
        let columns = NonZeroUsize::new(columns).ok_or(GridError::ZeroColumns)?;
        Self::from_nonzero(rows, columns)
    }

    /// Creates a grid spec from dimensions that are already known to be non-zero.
    pub fn from_nonzero(rows: NonZeroUsize, columns: NonZeroUsize) -> Result<Self, GridError> {
        rows.checked_mul(columns).ok_or(GridError::TooLarge)?;
        Ok(Self { rows, columns })
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows.get()
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns.get()
    }

    /// Total number of cells, `rows * columns`.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows.get() * self.columns.get()
    }

    /// Returns this spec with both dimensions multiplied by `multiplier`.
    ///
    /// This is how a base density and a user-facing "grid multiplier" combine
    /// into the spec actually applied to the surface.
    pub fn scaled(&self, multiplier: usize) -> Result<Self, GridError> {
        let multiplier = NonZeroUsize::new(multiplier).ok_or(GridError::ZeroMultiplier)?;
        let rows = self.rows.checked_mul(multiplier).ok_or(GridError::TooLarge)?;
        let columns = self
            .columns
            .checked_mul(multiplier)
            .ok_or(GridError::TooLarge)?;
        Self::from_nonzero(rows, columns)
    }

    /// Whether `coord` names a cell of this grid.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.rows.get() && coord.col < self.columns.get()
    }

    /// Row-major index of `coord`, or `None` if it lies outside the grid.
    #[must_use]
    pub const fn index_of(&self, coord: CellCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.row * self.columns.get() + coord.col)
        } else {
            None
        }
    }

    /// Row/column of a row-major `index`, or `None` if `index >= cell_count()`.
    #[must_use]
    pub const fn coord_of(&self, index: usize) -> Option<CellCoord> {
        if index < self.cell_count() {
            Some(CellCoord {
                row: index / self.columns.get(),
                col: index % self.columns.get(),
            })
        } else {
            None
        }
    }

    /// Whether a `footprint` anchored at `origin` lies entirely inside the grid.
    #[must_use]
    pub fn fits(&self, origin: CellCoord, footprint: Footprint) -> bool {
        origin
            .row
            .checked_add(footprint.height())
            .is_some_and(|end| end <= self.rows())
            && origin
                .col
                .checked_add(footprint.width())
                .is_some_and(|end| end <= self.columns())
    }
}

/// A zero-based `(row, col)` cell position.
///
/// Ordering is row-major, matching cell indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

impl CellCoord {
    /// Creates a cell coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// How many cells an item spans horizontally and vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    width_cells: NonZeroUsize,
    height_cells: NonZeroUsize,
}

impl Footprint {
    /// A single cell.
    pub const UNIT: Self = Self {
        width_cells: NonZeroUsize::MIN,
        height_cells: NonZeroUsize::MIN,
    };

    /// Creates a footprint of `width_cells × height_cells`.
    pub fn new(width_cells: usize, height_cells: usize) -> Result<Self, GridError> {
        match (
            NonZeroUsize::new(width_cells),
            NonZeroUsize::new(height_cells),
        ) {
            (Some(width_cells), Some(height_cells)) => Ok(Self {
                width_cells,
                height_cells,
            }),
            _ => Err(GridError::EmptyFootprint),
        }
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width_cells.get()
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height_cells.get()
    }

    /// Number of cells covered.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width_cells.get() * self.height_cells.get()
    }

    /// Indices covered when anchored at `origin`, or `None` if the footprint
    /// would leave the grid.
    #[must_use]
    pub fn indices_at(&self, origin: CellCoord, spec: GridSpec) -> Option<CellIndices> {
        if !spec.fits(origin, *self) {
            return None;
        }
        let mut out = CellIndices::with_capacity(self.cell_count());
        for row in origin.row..origin.row + self.height() {
            let start = row * spec.columns() + origin.col;
            out.extend(start..start + self.width());
        }
        Some(out)
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Logical size classes that items are authored in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeCategory {
    /// 1×1.
    #[default]
    Small,
    /// 2 wide, 1 tall.
    Wide,
    /// 1 wide, 2 tall.
    Tall,
    /// 2×2.
    Large,
}

impl SizeCategory {
    /// The footprint this category occupies.
    #[must_use]
    pub const fn footprint(self) -> Footprint {
        const TWO: NonZeroUsize = NonZeroUsize::MIN.saturating_add(1);
        let (width_cells, height_cells) = match self {
            Self::Small => (NonZeroUsize::MIN, NonZeroUsize::MIN),
            Self::Wide => (TWO, NonZeroUsize::MIN),
            Self::Tall => (NonZeroUsize::MIN, TWO),
            Self::Large => (TWO, TWO),
        };
        Footprint {
            width_cells,
            height_cells,
        }
    }
}

/// Anything that knows how many cells it occupies once placed.
pub trait Footprinted {
    /// The item's footprint.
    fn footprint(&self) -> Footprint;
}

impl Footprinted for Footprint {
    fn footprint(&self) -> Footprint {
        *self
    }
}

impl Footprinted for SizeCategory {
    fn footprint(&self) -> Footprint {
        Self::footprint(*self)
    }
}

/// The on-screen rectangle a grid is applied to.
///
/// All points handed to the grid functions must be in the same coordinate
/// space as `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceBounds {
    /// Top-left corner.
    pub position: Point,
    /// Width and height.
    pub size: Size,
}

impl SurfaceBounds {
    /// Creates surface bounds from a position and size.
    #[must_use]
    pub const fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    /// Creates surface bounds covering `rect`.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            position: rect.origin(),
            size: rect.size(),
        }
    }

    /// The bounds as a rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Size of a single cell when `spec` is applied to these bounds.
    #[must_use]
    pub fn cell_size(&self, spec: GridSpec) -> Size {
        Size::new(
            self.size.width / spec.columns() as f64,
            self.size.height / spec.rows() as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(GridSpec::new(0, 4), Err(GridError::ZeroRows));
        assert_eq!(GridSpec::new(4, 0), Err(GridError::ZeroColumns));
        assert_eq!(Footprint::new(0, 1), Err(GridError::EmptyFootprint));
        assert_eq!(Footprint::new(1, 0), Err(GridError::EmptyFootprint));
    }

    #[test]
    fn overflowing_cell_count_is_rejected() {
        assert_eq!(GridSpec::new(usize::MAX, 2), Err(GridError::TooLarge));
        let half = usize::MAX / 2;
        assert_eq!(GridSpec::new(half, 2).map(|s| s.cell_count()), Ok(half * 2));
        let big = NonZeroUsize::new(1 << (usize::BITS / 2)).unwrap();
        assert_eq!(GridSpec::from_nonzero(big, big), Err(GridError::TooLarge));
    }

    #[test]
    fn index_and_coord_are_row_major() {
        let spec = GridSpec::new(4, 4).unwrap();
        assert_eq!(spec.index_of(CellCoord::new(1, 1)), Some(5));
        assert_eq!(spec.coord_of(5), Some(CellCoord::new(1, 1)));
        assert_eq!(spec.coord_of(16), None);
        assert_eq!(spec.index_of(CellCoord::new(0, 4)), None);

        let wide = GridSpec::new(2, 5).unwrap();
        assert_eq!(wide.coord_of(7), Some(CellCoord::new(1, 2)));
    }

    #[test]
    fn fits_respects_both_axes() {
        let spec = GridSpec::new(4, 4).unwrap();
        let large = SizeCategory::Large.footprint();
        assert!(spec.fits(CellCoord::new(2, 2), large));
        assert!(!spec.fits(CellCoord::new(3, 2), large));
        assert!(!spec.fits(CellCoord::new(2, 3), large));
        assert!(!spec.fits(CellCoord::new(usize::MAX, 0), Footprint::UNIT));
    }

    #[test]
    fn footprint_indices_form_a_rectangle() {
        let spec = GridSpec::new(4, 4).unwrap();
        let large = SizeCategory::Large.footprint();
        let cells = large.indices_at(CellCoord::new(1, 1), spec).unwrap();
        assert_eq!(cells.as_slice(), &[5, 6, 9, 10]);
        assert!(large.indices_at(CellCoord::new(3, 3), spec).is_none());
    }

    #[test]
    fn size_categories_map_to_footprints() {
        assert_eq!(SizeCategory::Small.footprint(), Footprint::UNIT);
        assert_eq!(SizeCategory::Wide.footprint(), Footprint::new(2, 1).unwrap());
        assert_eq!(SizeCategory::Tall.footprint(), Footprint::new(1, 2).unwrap());
        assert_eq!(SizeCategory::Large.footprint().cell_count(), 4);
    }

    #[test]
    fn scaled_multiplies_both_dimensions() {
        let base = GridSpec::new(4, 3).unwrap();
        let doubled = base.scaled(2).unwrap();
        assert_eq!((doubled.rows(), doubled.columns()), (8, 6));
        assert_eq!(base.scaled(1).unwrap(), base);
        assert_eq!(base.scaled(0), Err(GridError::ZeroMultiplier));
        assert_eq!(base.scaled(usize::MAX), Err(GridError::TooLarge));
    }

    #[test]
    fn cell_size_divides_surface() {
        let bounds = SurfaceBounds::new(Point::new(10.0, 20.0), Size::new(400.0, 300.0));
        let size = bounds.cell_size(GridSpec::new(3, 4).unwrap());
        assert_eq!(size, Size::new(100.0, 100.0));
        assert_eq!(bounds.rect(), Rect::new(10.0, 20.0, 410.0, 320.0));
    }
}
