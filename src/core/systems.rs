//! Core domain: loop timing systems.

use avian2d::prelude::*;
use bevy::prelude::*;
use std::time::Duration;

use crate::core::resources::{MAX_FRAME_SECS, SessionStats};
use crate::core::state::GameplayPaused;

/// Cap the virtual clock so neither gameplay nor physics advances more than one
/// 60 Hz frame per tick, even after a hitch.
pub(crate) fn configure_loop_timing(
    mut virtual_time: ResMut<Time<Virtual>>,
    mut fixed_time: ResMut<Time<Fixed>>,
) {
    virtual_time.set_max_delta(Duration::from_secs_f32(MAX_FRAME_SECS));
    fixed_time.set_timestep_hz(60.0);
    info!(
        "[LOOP] Max step {:.3} ms, fixed physics rate 60 Hz",
        MAX_FRAME_SECS * 1000.0
    );
}

/// Mirror the gameplay pause onto the physics clock.
pub(crate) fn sync_physics_pause(
    paused: Res<GameplayPaused>,
    mut physics_time: ResMut<Time<Physics>>,
) {
    if !paused.is_changed() {
        return;
    }

    if paused.is_paused() && !physics_time.is_paused() {
        physics_time.pause();
        info!("[LOOP] Paused ({:?})", paused.sources);
    } else if !paused.is_paused() && physics_time.is_paused() {
        physics_time.unpause();
        info!("[LOOP] Resumed");
    }
}

pub(crate) fn tick_session_stats(
    time: Res<Time<Real>>,
    paused: Res<GameplayPaused>,
    mut stats: ResMut<SessionStats>,
) {
    stats.record_frame(time.delta_secs(), !paused.is_paused());
}
