//! Debug domain: tests for the grid, the status message and the diagnostic snapshot.

use bevy::prelude::*;

use super::{
    BoxSnapshot, CameraSnapshot, DebugState, DiagnosticSnapshot, GRID_SPACING, PlayerSnapshot,
    format_readout, grid_lines,
};
use crate::camera::CameraRig;
use crate::character::Character;
use crate::interaction::BoxStats;

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

#[test]
fn test_grid_lines_land_on_spacing_multiples() {
    let lines = grid_lines(Vec2::new(-30.0, 50.0), Vec2::new(250.0, 320.0), GRID_SPACING);

    let verticals: Vec<f32> = lines
        .iter()
        .filter(|(a, b)| a.x == b.x)
        .map(|(a, _)| a.x)
        .collect();
    let horizontals: Vec<f32> = lines
        .iter()
        .filter(|(a, b)| a.y == b.y)
        .map(|(a, _)| a.y)
        .collect();

    assert_eq!(verticals, vec![0.0, 100.0, 200.0]);
    assert_eq!(horizontals, vec![100.0, 200.0, 300.0]);
}

#[test]
fn test_grid_lines_span_the_view() {
    let min = Vec2::new(0.0, 0.0);
    let max = Vec2::new(1280.0, 720.0);
    for (start, end) in grid_lines(min, max, GRID_SPACING) {
        if start.x == end.x {
            assert_eq!(start.y, min.y);
            assert_eq!(end.y, max.y);
        } else {
            assert_eq!(start.x, min.x);
            assert_eq!(end.x, max.x);
        }
    }
}

#[test]
fn test_grid_lines_reject_bad_spacing() {
    assert!(grid_lines(Vec2::ZERO, Vec2::splat(500.0), 0.0).is_empty());
}

// ---------------------------------------------------------------------------
// Status message
// ---------------------------------------------------------------------------

#[test]
fn test_status_message_expires() {
    let mut state = DebugState::default();
    state.set_message("Grid ON", 1.0);

    state.tick_message(0.6);
    assert!(state.status_message.is_some());

    state.tick_message(0.6);
    assert!(state.status_message.is_none());
}

// ---------------------------------------------------------------------------
// Diagnostic snapshot
// ---------------------------------------------------------------------------

fn sample_snapshot() -> DiagnosticSnapshot {
    let mut character = Character::new(2);
    character.is_grounded = true;
    character.respawns = 3;

    DiagnosticSnapshot {
        fps: 59.6,
        game_time: 12.34,
        world: Some("jersey-shore".to_string()),
        player: Some(PlayerSnapshot::capture(
            Vec2::new(400.0, 500.0),
            Vec2::new(120.0, 0.0),
            &character,
        )),
        camera: CameraSnapshot::capture(&CameraRig::default()),
        boxes: BoxStats {
            inactive: 2,
            hit: 1,
            completed: 4,
        }
        .into(),
        ..default()
    }
}

#[test]
fn test_player_snapshot_reads_character() {
    let snapshot = sample_snapshot();
    let player = snapshot.player.as_ref().map(|p| (p.deaths, p.jumps_remaining, p.grounded));
    assert_eq!(player, Some((3, 2, true)));
    assert_eq!(
        snapshot.boxes,
        BoxSnapshot {
            inactive: 2,
            hit: 1,
            completed: 4
        }
    );
    assert_eq!(snapshot.camera.mode, "follow");
}

#[test]
fn test_readout_rows() {
    let text = format_readout(&sample_snapshot());
    assert!(text.contains("FPS: 60"));
    assert!(text.contains("Game time: 12.3s"));
    assert!(text.contains("World: jersey-shore"));
    assert!(text.contains("Deaths: 3"));
    assert!(text.contains("Pose: (400, 500) idle"));
    assert!(text.contains("Boxes: 2 inactive / 1 hit / 4 completed"));
    assert!(text.contains("State: running"));
}

#[test]
fn test_readout_without_player() {
    let snapshot = DiagnosticSnapshot {
        modal_project: Some("arcade".to_string()),
        paused: true,
        ..default()
    };
    let text = format_readout(&snapshot);
    assert!(text.contains("Player: not placed"));
    assert!(text.contains("World: -"));
    assert!(text.contains("State: modal 'arcade'"));
}

#[test]
fn test_snapshot_serialises_to_json() {
    let json = sample_snapshot().to_json().expect("snapshot serialises");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["world"], "jersey-shore");
    assert_eq!(value["player"]["deaths"], 3);
    assert_eq!(value["player"]["animation"], "idle");
    assert_eq!(value["boxes"]["completed"], 4);
    assert!(value["modal_project"].is_null());
}
