// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long-press drag onto a widget grid, then a density change.
//!
//! This example shows how to combine:
//! - `understory_event_state::intent` to recognize a deliberate drag from raw pointer input,
//! - `understory_placement` to snap drops onto the grid and track render damage,
//! - `understory_grid` to lay out cells and describe item sizes.
//!
//! Run:
//! - `cargo run -p understory_demos --example grid_placement`

use kurbo::{Point, Size};
use tracing::Level;
use understory_event_state::intent::{DragIntent, DragIntentConfig};
use understory_grid::{Footprint, Footprinted, GridSpec, SizeCategory, SurfaceBounds};
use understory_placement::{InputEvent, InputOutcome, PlacementSession};

/// A home-screen widget: a name and a size category.
#[derive(Clone, Debug)]
struct Widget {
    name: &'static str,
    size: SizeCategory,
}

impl Footprinted for Widget {
    fn footprint(&self) -> Footprint {
        self.size.footprint()
    }
}

/// One raw pointer sample: position and milliseconds since the press.
type Sample = (Point, u64);

fn main() {
    tracing_subscriber::fmt()
        .without_time()
        .with_max_level(Level::DEBUG)
        .init();

    let bounds = SurfaceBounds::new(Point::new(0.0, 80.0), Size::new(400.0, 400.0));
    let mut session = PlacementSession::new(GridSpec::new(4, 4).unwrap());
    let mut intent: DragIntent<&'static str> = DragIntent::new(DragIntentConfig::default());

    // The palette sits above the grid; widgets are held, then dragged down from it.
    let palette = [
        (
            Widget { name: "clock", size: SizeCategory::Small },
            Point::new(20.0, 20.0),
            [
                (Point::new(22.0, 21.0), 600),
                (Point::new(60.0, 150.0), 650),
                (Point::new(70.0, 140.0), 700),
            ],
        ),
        (
            Widget { name: "battery", size: SizeCategory::Wide },
            Point::new(120.0, 20.0),
            [
                (Point::new(121.0, 20.0), 600),
                (Point::new(200.0, 260.0), 650),
                (Point::new(310.0, 260.0), 700),
            ],
        ),
        (
            Widget { name: "photo", size: SizeCategory::Large },
            Point::new(220.0, 20.0),
            [
                (Point::new(220.0, 22.0), 600),
                (Point::new(300.0, 400.0), 650),
                (Point::new(390.0, 470.0), 700),
            ],
        ),
    ];

    for (t0, (widget, down, moves)) in [0, 1000, 2000].into_iter().zip(palette) {
        drag_widget(&mut session, &mut intent, bounds, widget, down, t0, &moves);
    }

    println!("\nPlaced on {}x{}:", session.spec().rows(), session.spec().columns());
    print_items(&session);
    let damage = session.commit();
    println!("Damage: {:?}", damage.updates);

    // A tap at the clock's cell finds it.
    if let Some(item) = session.item_at(bounds, Point::new(70.0, 140.0)) {
        println!("Hit test at (70, 140): {}", item.payload().name);
    }

    // Double the density: everything keeps its relative position and shape.
    let report = session.set_spec(GridSpec::new(8, 8).unwrap());
    println!("\nAfter density change to 8x8 ({} migrated):", report.migrated.len());
    print_items(&session);
    println!("Damage: {:?}", session.commit().updates);

    // Shrinking to 1x1 drops everything bigger than one cell.
    let report = session.set_spec(GridSpec::new(1, 1).unwrap());
    for item in &report.removed {
        println!("Removed on shrink: {}", item.payload().name);
    }
    println!("Damage: {:?}", session.commit());
}

/// Feeds raw pointer samples through the intent recognizer into the session.
fn drag_widget(
    session: &mut PlacementSession<Widget>,
    intent: &mut DragIntent<&'static str>,
    bounds: SurfaceBounds,
    widget: Widget,
    down: Point,
    t0: u64,
    moves: &[Sample],
) {
    intent.on_down(widget.name, down, t0);
    let mut last = (down, t0);
    let mut payload = Some(widget);
    for &(pos, dt) in moves {
        let ts = t0 + dt;
        let events = if let Some(trigger) = intent.on_move(pos, ts) {
            let Some(payload) = payload.take() else { return };
            // The element starts at the press position; movement since then is its first delta.
            let start = trigger.down_position;
            vec![
                InputEvent::Start { point: start, payload },
                InputEvent::Move { delta: pos - start },
            ]
        } else if intent.is_dragging() {
            vec![InputEvent::Move { delta: pos - last.0 }]
        } else {
            Vec::new()
        };
        for event in events {
            match session.handle(event, bounds, ts) {
                Ok(InputOutcome::Started | InputOutcome::Moved) => {}
                Ok(other) => println!("  unexpected outcome {other:?}"),
                Err(err) => println!("  input rejected: {err}"),
            }
        }
        last = (pos, ts);
        if let Some(origin) = session.preview_origin(bounds) {
            println!("  hovering {:?} -> would land at {:?}", pos, origin);
        }
    }
    if intent.on_up() {
        match session.handle(InputEvent::End { dropped: true }, bounds, last.1) {
            Ok(InputOutcome::Placed(id)) => println!("placed {id}"),
            Ok(other) => println!("drop finished as {other:?}"),
            Err(err) => println!("drop rejected: {err}"),
        }
    } else {
        println!("press on {:?} was not a drag", payload.map(|w| w.name));
    }
}

fn print_items(session: &PlacementSession<Widget>) {
    for item in session.items() {
        println!(
            "  {} {:<8} origin {:?} cells {:?}",
            item.id(),
            item.payload().name,
            item.origin(),
            item.cells()
        );
    }
}
