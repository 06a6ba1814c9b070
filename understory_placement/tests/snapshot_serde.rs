// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshots survive a trip through JSON.

#![cfg(feature = "serde")]

use understory_grid::{CellCoord, GridSpec, SizeCategory};
use understory_placement::{
    MigrationPolicy, PlacementError, PlacementSession, SessionConfig, Snapshot, UpdateStrategy,
};

#[test]
fn json_round_trip_restores_layout() {
    let mut session = PlacementSession::new(GridSpec::new(4, 4).unwrap());
    let wide = session
        .place_at(SizeCategory::Wide, CellCoord::new(0, 1))
        .unwrap();
    let large = session
        .place_at(SizeCategory::Large, CellCoord::new(2, 2))
        .unwrap();

    let json = serde_json::to_string(&session.snapshot()).unwrap();
    let decoded: Snapshot<SizeCategory> = serde_json::from_str(&json).unwrap();
    let mut restored = PlacementSession::from_snapshot(decoded, SessionConfig::default()).unwrap();

    assert_eq!(restored.spec(), GridSpec::new(4, 4).unwrap());
    assert_eq!(restored.get(wide).unwrap().cells(), &[1, 2]);
    assert_eq!(restored.get(large).unwrap().cells(), &[10, 11, 14, 15]);
    assert_eq!(
        restored.commit().strategy_for(large),
        Some(UpdateStrategy::Rebuild)
    );
}

#[test]
fn fragmented_items_keep_their_cells() {
    let config = SessionConfig::default().with_migration(MigrationPolicy::PerCell);
    let mut session = PlacementSession::with_config(GridSpec::new(4, 4).unwrap(), config);
    let id = session
        .place_at(SizeCategory::Wide, CellCoord::new(1, 1))
        .unwrap();
    session.set_spec(GridSpec::new(8, 8).unwrap());

    let json = serde_json::to_value(session.snapshot()).unwrap();
    let decoded: Snapshot<SizeCategory> = serde_json::from_value(json).unwrap();
    let restored = PlacementSession::from_snapshot(decoded, config).unwrap();
    assert_eq!(restored.get(id).unwrap().cells(), &[18, 20]);
}

#[test]
fn snapshot_outside_grid_is_rejected() {
    let json = r#"{
        "spec": { "rows": 2, "columns": 2 },
        "items": [
            { "id": 3, "payload": "Small", "origin": { "row": 0, "col": 0 }, "cells": [9] }
        ]
    }"#;
    let decoded: Snapshot<SizeCategory> = serde_json::from_str(json).unwrap();
    let err = PlacementSession::from_snapshot(decoded, SessionConfig::default()).unwrap_err();
    assert!(matches!(err, PlacementError::InvalidSnapshot(id) if id.get() == 3));
}

#[test]
fn snapshot_with_overflowing_grid_fails_to_decode() {
    let json = r#"{
        "spec": { "rows": 4294967296, "columns": 4294967296 },
        "items": []
    }"#;
    let err = serde_json::from_str::<Snapshot<SizeCategory>>(json).unwrap_err();
    assert!(err.to_string().contains("too many cells"), "{err}");

    let zero = r#"{ "spec": { "rows": 0, "columns": 3 }, "items": [] }"#;
    assert!(serde_json::from_str::<Snapshot<SizeCategory>>(zero).is_err());
}
