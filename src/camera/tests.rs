//! Camera domain: tests for the follow and modal laws, zoom and shake.

use bevy::prelude::*;

use super::{CameraMode, CameraRig, CameraTuning, ShakePreset, smoothing_step};
use crate::core::EffectsRng;
use crate::physics::Aabb;

const TICK: f32 = 1.0 / 60.0;

fn rig_with_viewport(width: f32, height: f32) -> CameraRig {
    let mut rig = CameraRig::new(CameraTuning::default());
    rig.set_viewport(Vec2::new(width, height));
    rig
}

// -----------------------------------------------------------------------------
// Follow mode tests
// -----------------------------------------------------------------------------

#[test]
fn test_smoothing_step_matches_per_tick_factor_at_60hz() {
    assert!((smoothing_step(0.1, TICK) - 0.1).abs() < 1e-5);
    assert!((smoothing_step(0.1, 2.0 * TICK) - 0.19).abs() < 1e-5);
}

#[test]
fn test_follow_moves_a_tenth_of_the_gap() {
    let mut rig = rig_with_viewport(800.0, 600.0);
    rig.follow(Vec2::new(1400.0, 300.0), TICK);

    // target = (1000, 0); one tick closes 10 %.
    assert_eq!(rig.target, Vec2::new(1000.0, 0.0));
    assert!((rig.position.x - 100.0).abs() < 0.01);
}

#[test]
fn test_follow_target_clamped_to_bounds() {
    let mut rig = rig_with_viewport(800.0, 600.0);
    rig.set_bounds(Aabb::from_top_left(0.0, 0.0, 3000.0, 700.0));

    rig.follow(Vec2::new(100.0, 100.0), TICK);
    assert_eq!(rig.target, Vec2::ZERO);

    rig.follow(Vec2::new(2950.0, 690.0), TICK);
    assert_eq!(rig.target, Vec2::new(2200.0, 100.0));
}

#[test]
fn test_snap_stays_within_bounds() {
    let mut rig = rig_with_viewport(800.0, 600.0);
    rig.set_bounds(Aabb::from_top_left(0.0, 0.0, 3000.0, 700.0));

    rig.snap_to(Vec2::new(-28.0, 0.0));
    assert_eq!(rig.position, Vec2::ZERO);
    assert_eq!(rig.target, rig.position);

    rig.snap_to(Vec2::new(1200.0, 50.0));
    assert_eq!(rig.position, Vec2::new(1200.0, 50.0));
}

#[test]
fn test_follow_world_smaller_than_viewport_pins_to_min() {
    let mut rig = rig_with_viewport(800.0, 600.0);
    rig.set_bounds(Aabb::from_top_left(0.0, 0.0, 500.0, 400.0));

    rig.follow(Vec2::new(250.0, 200.0), TICK);
    assert_eq!(rig.target, Vec2::ZERO);
}

#[test]
fn test_follow_converges_on_target() {
    let mut rig = rig_with_viewport(800.0, 600.0);
    for _ in 0..300 {
        rig.follow(Vec2::new(1400.0, 300.0), TICK);
    }
    assert!((rig.position - rig.target).length() < 0.5);
}

// -----------------------------------------------------------------------------
// Modal mode tests
// -----------------------------------------------------------------------------

#[test]
fn test_modal_frames_player_at_anchor_at_any_zoom() {
    let mut rig = rig_with_viewport(1000.0, 600.0);
    rig.set_bounds(Aabb::from_top_left(0.0, 0.0, 3000.0, 700.0));
    rig.enter_modal();
    let player = Vec2::new(40.0, 500.0);

    for zoom in [1.0, 1.2, 1.5] {
        rig.zoom = zoom;
        rig.follow(player, TICK);
        let screen = rig.world_to_screen(player);
        assert!((screen - Vec2::new(250.0, 300.0)).length() < 0.01);
    }
}

#[test]
fn test_modal_bypasses_bounds() {
    let mut rig = rig_with_viewport(1000.0, 600.0);
    rig.set_bounds(Aabb::from_top_left(0.0, 0.0, 3000.0, 700.0));
    rig.enter_modal();
    rig.follow(Vec2::new(40.0, 500.0), TICK);

    assert!(rig.position.x < 0.0);
}

#[test]
fn test_modal_zoom_animates_then_snaps() {
    let mut rig = rig_with_viewport(1000.0, 600.0);
    let mut rng = EffectsRng::seeded(7);
    rig.enter_modal();
    assert_eq!(rig.mode, CameraMode::Modal);

    rig.update(TICK, &mut rng.0);
    assert!(rig.zoom > 1.0 && rig.zoom < 1.5);

    for _ in 0..200 {
        rig.update(TICK, &mut rng.0);
    }
    assert_eq!(rig.zoom, 1.5);

    rig.exit_modal();
    for _ in 0..200 {
        rig.update(TICK, &mut rng.0);
    }
    assert_eq!(rig.mode, CameraMode::Follow);
    assert_eq!(rig.zoom, 1.0);
}

// -----------------------------------------------------------------------------
// Shake and projection tests
// -----------------------------------------------------------------------------

#[test]
fn test_shake_bounded_and_expires() {
    let mut rig = rig_with_viewport(800.0, 600.0);
    let mut rng = EffectsRng::seeded(3);
    rig.shake(ShakePreset::Medium);

    rig.update(TICK, &mut rng.0);
    assert!(rig.shake_offset.x.abs() <= 6.0 && rig.shake_offset.y.abs() <= 6.0);

    for _ in 0..30 {
        rig.update(TICK, &mut rng.0);
    }
    assert!(!rig.is_shaking());
    assert_eq!(rig.shake_offset, Vec2::ZERO);
}

#[test]
fn test_new_shake_replaces_previous() {
    let mut rig = rig_with_viewport(800.0, 600.0);
    let mut rng = EffectsRng::seeded(5);
    rig.shake(ShakePreset::Heavy);
    rig.shake(ShakePreset::Light);

    // Light lasts 0.15 s; a heavy shake would still run after 0.2 s.
    for _ in 0..12 {
        rig.update(TICK, &mut rng.0);
    }
    assert!(!rig.is_shaking());
}

#[test]
fn test_zoom_is_about_viewport_center() {
    let mut rig = rig_with_viewport(800.0, 600.0);
    rig.snap_to(Vec2::new(100.0, 50.0));
    let center_world = rig.view_center();

    rig.zoom = 2.0;
    assert_eq!(rig.view_center(), center_world);
    assert_eq!(rig.world_to_screen(center_world), Vec2::new(400.0, 300.0));
}

#[test]
fn test_screen_to_world_inverts_projection() {
    let mut rig = rig_with_viewport(800.0, 600.0);
    rig.snap_to(Vec2::new(120.0, -40.0));
    rig.zoom = 1.5;

    let point = Vec2::new(333.0, 222.0);
    let back = rig.screen_to_world(rig.world_to_screen(point));
    assert!((back - point).length() < 1e-3);
}

#[test]
fn test_reset_returns_to_follow_at_base_zoom() {
    let mut rig = rig_with_viewport(800.0, 600.0);
    rig.enter_modal();
    rig.zoom = 1.4;
    rig.shake(ShakePreset::Heavy);

    rig.reset();
    assert_eq!(rig.mode, CameraMode::Follow);
    assert_eq!(rig.zoom, 1.0);
    assert!(!rig.is_shaking());
}
