// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: drag multi-cell items onto a grid and keep them there.
//!
//! A [`PlacementSession`] owns the items placed on one surface. It consumes
//! ordered drag input ([`InputEvent`]), snaps each drop to the best legal
//! origin on the grid, and remaps every item when the grid density changes.
//!
//! - **Drag**: [`InputEvent::Start`], [`InputEvent::Move`] and
//!   [`InputEvent::End`] drive a [`DragState`](understory_event_state::drag::DragState).
//!   While dragging, [`PlacementSession::preview_origin`] tells where the item would land.
//! - **Drop**: a release inside the surface is placed at the origin whose
//!   footprint centroid is nearest the drop point. A release outside the
//!   surface stays claimable by other targets ([`PlacementSession::claim_external`])
//!   until it expires.
//! - **Density**: [`PlacementSession::set_spec`] remaps items per
//!   [`MigrationPolicy`] and reports items that no longer fit.
//! - **Rendering**: [`PlacementSession::commit`] returns a [`Damage`] listing
//!   each changed item once with its [`UpdateStrategy`].
//! - **Persistence**: [`PlacementSession::snapshot`] and
//!   [`PlacementSession::from_snapshot`] round-trip the grid spec and items.
//!
//! Payloads describe their size through [`Footprinted`](understory_grid::Footprinted).
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_grid::{CellCoord, GridSpec, SizeCategory, SurfaceBounds};
//! use understory_placement::{InputEvent, InputOutcome, PlacementSession, UpdateStrategy};
//!
//! let bounds = SurfaceBounds::new(Point::ORIGIN, Size::new(400.0, 400.0));
//! let mut session = PlacementSession::new(GridSpec::new(4, 4).unwrap());
//!
//! session
//!     .handle(InputEvent::Start { point: Point::new(10.0, 10.0), payload: SizeCategory::Wide }, bounds, 0)
//!     .unwrap();
//! session.handle(InputEvent::Move { delta: Vec2::new(100.0, 140.0) }, bounds, 16).unwrap();
//! let outcome = session.handle(InputEvent::End { dropped: true }, bounds, 32).unwrap();
//!
//! let InputOutcome::Placed(id) = outcome else { panic!("not placed") };
//! assert_eq!(session.get(id).unwrap().origin(), CellCoord::new(1, 0));
//! assert_eq!(session.commit().strategy_for(id), Some(UpdateStrategy::Rebuild));
//!
//! // Doubling the density keeps the item's relative position.
//! let report = session.set_spec(GridSpec::new(8, 8).unwrap());
//! assert!(report.removed.is_empty());
//! assert_eq!(session.get(id).unwrap().origin(), CellCoord::new(2, 0));
//! ```
//!
//! ## Logging
//!
//! Session transitions are reported through [`tracing`] at `debug` level;
//! items lost to a density change are reported at `warn`. Install any
//! subscriber to see them.
//!
//! ## Features
//!
//! - `std` *(default)*: forwards to the `std` features of dependencies.
//! - `libm`: `no_std` float support through `kurbo/libm`.
//! - `serde`: derives `Serialize`/`Deserialize` for [`Snapshot`] and [`ItemId`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod damage;
mod error;
mod item;
mod session;
mod snapshot;

pub use config::{MigrationPolicy, SessionConfig};
pub use damage::{Damage, UpdateStrategy};
pub use error::PlacementError;
pub use item::{ItemId, PlacedItem};
pub use session::{InputEvent, InputOutcome, MigrationReport, PlacementSession};
pub use snapshot::{ItemRecord, Snapshot};
