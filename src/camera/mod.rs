//! Camera domain: smoothed follow with bounds, zoom, shake and a modal framing.

mod rig;
mod systems;
mod tuning;

#[cfg(test)]
mod tests;

pub use rig::{CameraMode, CameraRig, ShakePreset, smoothing_step};
pub use systems::MainCamera;
pub use tuning::CameraTuning;

use bevy::prelude::*;

use crate::camera::systems::{
    apply_camera_transform, follow_player, setup_camera, shake_on_death, track_viewport,
    update_camera,
};
use crate::core::TickSet;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraRig>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (track_viewport, follow_player)
                    .chain()
                    .in_set(TickSet::CameraFollow),
            )
            .add_systems(
                Update,
                (shake_on_death, update_camera)
                    .chain()
                    .in_set(TickSet::CameraUpdate),
            )
            .add_systems(Update, apply_camera_transform.in_set(TickSet::Presentation));
    }
}
