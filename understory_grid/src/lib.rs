// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_grid --heading-base-level=0

//! Understory Grid: uniform cell grids over a rectangular surface.
//!
//! This crate answers three questions for a surface subdivided into
//! `rows × columns` equal cells:
//!
//! - Where are the cells? [`compute_cells`] turns a [`GridSpec`] and
//!   [`SurfaceBounds`] into row-major [`GridCell`] rectangles.
//! - Where should a dropped item go? [`find_best_origin`] maps a drop point and
//!   a multi-cell [`Footprint`] to the top-left [`CellCoord`] of the placement
//!   whose centroid is nearest the drop, rejecting placements that would leave
//!   the grid or overlap an optional [`Occupancy`].
//! - Where do placed items go when the density changes? [`migrate_indices`]
//!   remaps individual cells, and [`migrate_origin`] remaps an item's origin
//!   while preserving its shape.
//!
//! Everything here is a pure function over small inputs; there is no retained
//! state besides the values you pass in.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_grid::{
//!     CellCoord, GridSpec, SizeCategory, SurfaceBounds, compute_cells, find_best_origin,
//!     migrate_origin,
//! };
//!
//! let spec = GridSpec::new(4, 4).unwrap();
//! let bounds = SurfaceBounds::new(Point::ORIGIN, Size::new(400.0, 400.0));
//! let cells = compute_cells(spec, bounds);
//! assert_eq!(cells.len(), 16);
//!
//! // A 2x2 item dropped into the bottom-right cell snaps so it stays on the grid.
//! let large = SizeCategory::Large.footprint();
//! let origin = find_best_origin(Point::new(390.0, 390.0), large, &cells, spec, bounds, None);
//! assert_eq!(origin, Some(CellCoord::new(2, 2)));
//!
//! // Doubling the density moves it proportionally.
//! let denser = spec.scaled(2).unwrap();
//! assert_eq!(
//!     migrate_origin(CellCoord::new(2, 2), large, spec, denser),
//!     Some(CellCoord::new(4, 4))
//! );
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` float support.
//! - `serde`: derives `Serialize`/`Deserialize` for the persistent value types
//!   ([`GridSpec`], [`CellCoord`], [`Footprint`], [`SizeCategory`]).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod best_fit;
mod cells;
mod migrate;
mod occupancy;
mod types;

pub use best_fit::find_best_origin;
pub use cells::{GridCell, cell_at_point, cell_rect, compute_cells, footprint_rect};
pub use migrate::{migrate_coord, migrate_indices, migrate_origin};
pub use occupancy::Occupancy;
pub use types::{
    CellCoord, CellIndices, Footprint, Footprinted, GridError, GridSpec, SizeCategory,
    SurfaceBounds,
};
