// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement session: drag input in, placed items out.

use alloc::vec::Vec;
use core::mem;

use kurbo::{Point, Rect, Vec2};
use tracing::{debug, warn};
use understory_event_state::drag::{DragPhase, DragState};
use understory_event_state::drop;
use understory_grid::{
    CellCoord, CellIndices, Footprint, Footprinted, GridSpec, Occupancy, SurfaceBounds,
    cell_at_point, compute_cells, find_best_origin, migrate_indices, migrate_origin,
};

use crate::config::{MigrationPolicy, SessionConfig};
use crate::damage::Damage;
use crate::error::PlacementError;
use crate::item::{ItemId, Mark, PlacedItem};
use crate::snapshot::{ItemRecord, Snapshot};

/// One event from the pointer or gesture layer.
///
/// Events for a surface arrive strictly ordered: one `Start`, any number of
/// `Move`s, then one `End`.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent<P> {
    /// A deliberate drag began with the dragged element at `point`.
    Start {
        /// Position of the dragged element.
        point: Point,
        /// What is being dragged.
        payload: P,
    },
    /// The pointer moved by `delta` since the previous event.
    Move {
        /// Movement since the previous event.
        delta: Vec2,
    },
    /// The gesture ended. `dropped` is `false` when it was interrupted.
    End {
        /// Whether the pointer was released (as opposed to the gesture being cancelled).
        dropped: bool,
    },
}

/// What [`PlacementSession::handle`] did with an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// A drag started.
    Started,
    /// The live offset changed.
    Moved,
    /// The event did not apply to the current state.
    Ignored,
    /// The dropped payload was placed as this item.
    Placed(ItemId),
    /// The drag was cancelled; a picked-up item went back where it was.
    Cancelled,
    /// The payload was released outside the surface and can be claimed by
    /// another drop target until it expires.
    AwaitingTarget,
}

/// Result of a density change.
#[derive(Clone, Debug)]
pub struct MigrationReport<P> {
    /// Items that were carried over to the new grid.
    pub migrated: Vec<ItemId>,
    /// Items that could not be mapped onto the new grid and were removed.
    ///
    /// Callers should surface these rather than silently lose them.
    pub removed: Vec<PlacedItem<P>>,
}

impl<P> Default for MigrationReport<P> {
    fn default() -> Self {
        Self {
            migrated: Vec::new(),
            removed: Vec::new(),
        }
    }
}

/// A placed item that has been picked up and is riding on the drag.
#[derive(Clone, Debug)]
struct Held {
    id: ItemId,
    footprint: Footprint,
    origin: CellCoord,
    cells: CellIndices,
    mark: Option<Mark>,
}

/// Owns the placed items of one surface and the drag that feeds it.
///
/// The surface's [`SurfaceBounds`] are not stored: pass the bounds from the
/// current layout pass to each call that needs geometry.
#[derive(Clone, Debug)]
pub struct PlacementSession<P> {
    spec: GridSpec,
    config: SessionConfig,
    items: Vec<PlacedItem<P>>,
    drag: DragState<P>,
    held: Option<Held>,
    removed: Vec<ItemId>,
    next_id: u64,
}

impl<P: Footprinted> PlacementSession<P> {
    /// Creates an empty session over `spec` with the default configuration.
    pub fn new(spec: GridSpec) -> Self {
        Self::with_config(spec, SessionConfig::default())
    }

    /// Creates an empty session over `spec`.
    pub fn with_config(spec: GridSpec, config: SessionConfig) -> Self {
        Self {
            spec,
            config,
            items: Vec::new(),
            drag: DragState::new(),
            held: None,
            removed: Vec::new(),
            next_id: 0,
        }
    }

    /// The active grid density.
    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// The session configuration.
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Placed items in placement order.
    ///
    /// An item that has been picked up is not listed until it is dropped or
    /// returned.
    pub fn items(&self) -> &[PlacedItem<P>] {
        &self.items
    }

    /// Number of placed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are placed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a placed item.
    pub fn get(&self, id: ItemId) -> Option<&PlacedItem<P>> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The drag state, for hosts that run their own drop targets.
    pub fn drag(&self) -> &DragState<P> {
        &self.drag
    }

    /// Cells currently taken by placed items.
    pub fn occupancy(&self) -> Occupancy {
        Occupancy::from_items(self.items.iter().map(PlacedItem::cells))
    }

    /// Applies one input event.
    ///
    /// A drop that finds no legal placement returns
    /// [`PlacementError::OutOfBounds`]; the payload is not placed (a picked-up
    /// item returns to its previous position) and the drag resets.
    pub fn handle(
        &mut self,
        event: InputEvent<P>,
        bounds: SurfaceBounds,
        now: u64,
    ) -> Result<InputOutcome, PlacementError> {
        match event {
            InputEvent::Start { point, payload } => {
                self.start_drag(point, payload);
                Ok(InputOutcome::Started)
            }
            InputEvent::Move { delta } => Ok(if self.drag.on_move(delta) {
                InputOutcome::Moved
            } else {
                InputOutcome::Ignored
            }),
            InputEvent::End { dropped: false } => Ok(if self.cancel_drag() {
                InputOutcome::Cancelled
            } else {
                InputOutcome::Ignored
            }),
            InputEvent::End { dropped: true } => self.drop_at(bounds, now),
        }
    }

    /// Starts dragging a new payload from `point`.
    ///
    /// A payload still waiting from an earlier release is settled first.
    pub fn start_drag(&mut self, point: Point, payload: P) {
        self.settle_pending();
        self.drag.start(point, payload);
        debug!(x = point.x, y = point.y, "drag started");
    }

    /// Lifts a placed item off the grid and starts dragging it from `point`.
    ///
    /// If the drag is cancelled, expires, or the drop finds no placement, the
    /// item returns to where it was.
    pub fn pick_up(&mut self, id: ItemId, point: Point) -> Result<(), PlacementError> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(PlacementError::UnknownItem(id))?;
        self.settle_pending();
        let item = self.items.remove(pos);
        self.held = Some(Held {
            id: item.id,
            footprint: item.footprint,
            origin: item.origin,
            cells: item.cells.clone(),
            mark: item.mark,
        });
        self.drag.start(point, item.consume());
        debug!(item = %id, "item picked up");
        Ok(())
    }

    /// Moves the drag by `delta`. Returns `false` if no drag is active.
    pub fn move_drag(&mut self, delta: Vec2) -> bool {
        self.drag.on_move(delta)
    }

    /// Cancels the drag, discarding a new payload or returning a picked-up item.
    ///
    /// Returns `true` if there was anything to cancel.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(payload) = self.drag.cancel() else {
            return false;
        };
        debug!("drag cancelled");
        self.return_payload(payload);
        true
    }

    /// Releases the drag at `now` and tries to place the payload on this surface.
    pub fn drop_at(
        &mut self,
        bounds: SurfaceBounds,
        now: u64,
    ) -> Result<InputOutcome, PlacementError> {
        if !self.drag.release(now) {
            return Err(PlacementError::NothingToDrop);
        }
        let surface = bounds.rect();
        let Some(footprint) = drop::resolve(&self.drag, surface).map(Footprinted::footprint) else {
            debug!("released outside the surface");
            return Ok(InputOutcome::AwaitingTarget);
        };

        let point = self.drag.resolved_position();
        let placement = self
            .best_origin(point, footprint, bounds)
            .and_then(|origin| Some((origin, footprint.indices_at(origin, self.spec)?)));
        let Some((origin, cells)) = placement else {
            debug!(x = point.x, y = point.y, "no legal placement; drop rejected");
            if let Some(payload) = self.drag.cancel() {
                self.return_payload(payload);
            }
            return Err(PlacementError::OutOfBounds);
        };

        let id = match self.held.as_ref().map(|held| held.id) {
            Some(id) => id,
            None => match self.fresh_id() {
                Ok(id) => id,
                Err(err) => {
                    self.cancel_drag();
                    return Err(err);
                }
            },
        };
        let Some(payload) = drop::claim(&mut self.drag, surface) else {
            return Err(PlacementError::NothingToDrop);
        };
        self.drag.clear();

        let mark = match self.held.take() {
            Some(held) if held.origin == origin && held.cells == cells => held.mark,
            Some(held) => Some(Mark::merge(held.mark, Mark::Moved)),
            None => Some(Mark::Added),
        };
        self.push(id, payload, footprint, origin, cells, mark);
        debug!(item = %id, row = origin.row, col = origin.col, "item placed");
        Ok(InputOutcome::Placed(id))
    }

    /// Hands a payload released outside the surface to another drop target.
    ///
    /// If the payload was a picked-up item, that item leaves the session (for
    /// example when dropped on a "remove" zone).
    pub fn claim_external(&mut self, target: Rect) -> Option<P> {
        let payload = drop::claim(&mut self.drag, target)?;
        self.drag.clear();
        if let Some(held) = self.held.take() {
            debug!(item = %held.id, "item claimed by another target");
            self.note_removed(held.id, held.mark);
        }
        Some(payload)
    }

    /// Settles a released payload that nobody claimed within the configured
    /// timeout.
    ///
    /// A picked-up item returns to its place; a new payload is discarded and
    /// returned to the caller.
    pub fn expire_unclaimed(&mut self, now: u64) -> Option<P> {
        let timeout = self.config.claim_timeout_ms?;
        let payload = self.drag.expire(now, timeout)?;
        debug!("unclaimed payload expired");
        if self.held.is_some() {
            self.return_payload(payload);
            None
        } else {
            Some(payload)
        }
    }

    /// Where the dragged element is now, while a drag is active.
    pub fn preview_position(&self) -> Option<Point> {
        (self.drag.phase() == DragPhase::Dragging).then(|| self.drag.resolved_position())
    }

    /// The origin the dragged payload would snap to if released now.
    pub fn preview_origin(&self, bounds: SurfaceBounds) -> Option<CellCoord> {
        let point = self.preview_position()?;
        let footprint = self.drag.payload()?.footprint();
        self.best_origin(point, footprint, bounds)
    }

    /// Whether an active drag is currently over the surface.
    pub fn hovering(&self, bounds: SurfaceBounds) -> bool {
        drop::hovering(&self.drag, bounds.rect())
    }

    /// Places `payload` directly at `origin`, without a drag.
    ///
    /// With overlap exclusion on, the cells a picked-up item would return to
    /// count as occupied.
    pub fn place_at(&mut self, payload: P, origin: CellCoord) -> Result<ItemId, PlacementError> {
        let footprint = payload.footprint();
        let cells = footprint
            .indices_at(origin, self.spec)
            .ok_or(PlacementError::OutOfBounds)?;
        if self.config.exclude_occupied {
            let mut occupancy = self.occupancy();
            if let Some(held) = &self.held {
                occupancy.insert_all(held.cells.iter().copied());
            }
            if occupancy.any_occupied(&cells) {
                return Err(PlacementError::OutOfBounds);
            }
        }
        let id = self.fresh_id()?;
        self.push(id, payload, footprint, origin, cells, Some(Mark::Added));
        Ok(id)
    }

    /// Removes a placed item, returning its payload.
    pub fn remove(&mut self, id: ItemId) -> Result<P, PlacementError> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(PlacementError::UnknownItem(id))?;
        let item = self.items.remove(pos);
        self.note_removed(item.id, item.mark);
        debug!(item = %id, "item removed");
        Ok(item.consume())
    }

    /// The topmost item covering `point`.
    pub fn item_at(&self, bounds: SurfaceBounds, point: Point) -> Option<&PlacedItem<P>> {
        let coord = cell_at_point(self.spec, bounds, point)?;
        let index = self.spec.index_of(coord)?;
        self.items
            .iter()
            .rev()
            .find(|item| item.cells.contains(&index))
    }

    /// Switches to a new grid density, remapping every placed item.
    ///
    /// Items that cannot be mapped are removed and listed in the report. This
    /// includes a picked-up item whose return position has no counterpart on
    /// the new grid: its drag ends and its payload is reported as removed.
    pub fn set_spec(&mut self, spec: GridSpec) -> MigrationReport<P> {
        let mut report = MigrationReport::default();
        if spec == self.spec {
            return report;
        }
        let old = self.spec;
        let policy = self.config.migration;

        for mut item in mem::take(&mut self.items) {
            match remap(policy, item.footprint, item.origin, &item.cells, old, spec) {
                Some((origin, cells)) => {
                    item.origin = origin;
                    item.cells = cells;
                    item.mark = Some(Mark::merge(item.mark, Mark::Reshaped));
                    report.migrated.push(item.id);
                    self.items.push(item);
                }
                None => {
                    warn!(item = %item.id, "item does not fit the new grid; removing");
                    self.note_removed(item.id, item.mark);
                    report.removed.push(item);
                }
            }
        }

        if let Some(held) = self.held.as_mut() {
            match remap(policy, held.footprint, held.origin, &held.cells, old, spec) {
                Some((origin, cells)) => {
                    held.origin = origin;
                    held.cells = cells;
                    held.mark = Some(Mark::merge(held.mark, Mark::Reshaped));
                }
                None => {
                    warn!(item = %held.id, "held item does not fit the new grid; removing");
                    let held = self.held.take();
                    let payload = self.drag.cancel();
                    if let (Some(held), Some(payload)) = (held, payload) {
                        self.note_removed(held.id, held.mark);
                        report.removed.push(PlacedItem {
                            id: held.id,
                            payload,
                            footprint: held.footprint,
                            origin: held.origin,
                            cells: held.cells,
                            mark: held.mark,
                        });
                    }
                }
            }
        }

        debug!(
            rows = spec.rows(),
            columns = spec.columns(),
            migrated = report.migrated.len(),
            removed = report.removed.len(),
            "grid density changed"
        );
        self.spec = spec;
        report
    }

    /// Switches to `base` scaled by `multiplier`.
    pub fn set_density(
        &mut self,
        base: GridSpec,
        multiplier: usize,
    ) -> Result<MigrationReport<P>, PlacementError> {
        let spec = base.scaled(multiplier)?;
        Ok(self.set_spec(spec))
    }

    /// Returns the render changes since the previous commit and clears them.
    ///
    /// Each changed item appears once, with the strategy its accumulated
    /// changes resolve to.
    pub fn commit(&mut self) -> Damage {
        let updates = self
            .items
            .iter_mut()
            .filter_map(|item| item.mark.take().map(|mark| (item.id, mark.strategy())))
            .collect();
        Damage {
            updates,
            removed: mem::take(&mut self.removed),
        }
    }

    /// Exports the grid spec and placed items as plain data.
    ///
    /// A picked-up item is recorded at the position it would return to.
    pub fn snapshot(&self) -> Snapshot<P>
    where
        P: Clone,
    {
        let mut items: Vec<ItemRecord<P>> = self
            .items
            .iter()
            .map(|item| ItemRecord {
                id: item.id,
                payload: item.payload.clone(),
                origin: item.origin,
                cells: item.cells.to_vec(),
            })
            .collect();
        if let (Some(held), Some(payload)) = (&self.held, self.drag.payload()) {
            items.push(ItemRecord {
                id: held.id,
                payload: payload.clone(),
                origin: held.origin,
                cells: held.cells.to_vec(),
            });
        }
        Snapshot {
            spec: self.spec,
            items,
        }
    }

    /// Rebuilds a session from a snapshot.
    ///
    /// Every restored item is reported as added by the first [`commit`](Self::commit).
    /// Identifiers must be below `u64::MAX`.
    pub fn from_snapshot(
        snapshot: Snapshot<P>,
        config: SessionConfig,
    ) -> Result<Self, PlacementError> {
        let mut session = Self::with_config(snapshot.spec, config);
        for record in snapshot.items {
            let id = record.id;
            let mut cells: CellIndices = record.cells.into_iter().collect();
            cells.sort_unstable();
            cells.dedup();
            let valid = !cells.is_empty()
                && cells.iter().all(|&index| index < session.spec.cell_count())
                && session.spec.contains(record.origin)
                && session.get(id).is_none();
            if !valid {
                return Err(PlacementError::InvalidSnapshot(id));
            }
            let footprint = record.payload.footprint();
            session.push(id, record.payload, footprint, record.origin, cells, Some(Mark::Added));
            let after = id.0.checked_add(1).ok_or(PlacementError::InvalidSnapshot(id))?;
            session.next_id = session.next_id.max(after);
        }
        Ok(session)
    }

    fn best_origin(
        &self,
        point: Point,
        footprint: Footprint,
        bounds: SurfaceBounds,
    ) -> Option<CellCoord> {
        let cells = compute_cells(self.spec, bounds);
        let occupancy = self.config.exclude_occupied.then(|| self.occupancy());
        find_best_origin(point, footprint, &cells, self.spec, bounds, occupancy.as_ref())
    }

    /// Returns a payload that left the drag without being placed.
    fn return_payload(&mut self, payload: P) {
        match self.held.take() {
            Some(held) => {
                debug!(item = %held.id, "item returned to its place");
                self.push(
                    held.id,
                    payload,
                    held.footprint,
                    held.origin,
                    held.cells,
                    held.mark,
                );
            }
            None => debug!("payload discarded"),
        }
    }

    /// Clears out a released payload before a new drag replaces it.
    fn settle_pending(&mut self) {
        if let Some(payload) = self.drag.cancel() {
            self.return_payload(payload);
        }
    }

    fn push(
        &mut self,
        id: ItemId,
        payload: P,
        footprint: Footprint,
        origin: CellCoord,
        cells: CellIndices,
        mark: Option<Mark>,
    ) {
        debug_assert!(!cells.is_empty(), "placed items occupy at least one cell");
        self.items.push(PlacedItem {
            id,
            payload,
            footprint,
            origin,
            cells,
            mark,
        });
    }

    fn note_removed(&mut self, id: ItemId, mark: Option<Mark>) {
        // Never committed: nothing for a renderer to tear down.
        if mark != Some(Mark::Added) {
            self.removed.push(id);
        }
    }

    fn fresh_id(&mut self) -> Result<ItemId, PlacementError> {
        let id = ItemId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(PlacementError::IdsExhausted)?;
        Ok(id)
    }
}

/// Computes an item's origin and cells on `new` according to `policy`.
fn remap(
    policy: MigrationPolicy,
    footprint: Footprint,
    origin: CellCoord,
    cells: &[usize],
    old: GridSpec,
    new: GridSpec,
) -> Option<(CellCoord, CellIndices)> {
    match policy {
        MigrationPolicy::PerItem => {
            let origin = migrate_origin(origin, footprint, old, new)?;
            Some((origin, footprint.indices_at(origin, new)?))
        }
        MigrationPolicy::PerCell => {
            let remapped = migrate_indices(cells.iter().copied(), old, new);
            let origin = new.coord_of(*remapped.first()?)?;
            Some((origin, remapped.into_iter().collect()))
        }
    }
}
