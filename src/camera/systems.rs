//! Camera domain: drives the rig from the player and maps it onto `Camera2d`.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::{CameraRig, ShakePreset};
use crate::character::{AwaitingSpawn, DeathEvent, Player};
use crate::content::RuntimeSettings;
use crate::core::EffectsRng;
use crate::physics::{scene_translation, screen_position};

#[derive(Component, Debug)]
pub struct MainCamera;

pub(crate) fn setup_camera(mut commands: Commands, settings: Res<RuntimeSettings>) {
    commands.insert_resource(CameraRig::new(settings.camera.clone()));
    commands.spawn((
        MainCamera,
        Camera2d,
        Projection::Orthographic(OrthographicProjection::default_2d()),
    ));
}

pub(crate) fn track_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut rig: ResMut<CameraRig>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    if rig.viewport != size {
        rig.set_viewport(size);
        debug!("[CAMERA] Viewport {}x{}", size.x, size.y);
    }
}

pub(crate) fn follow_player(
    time: Res<Time>,
    mut rig: ResMut<CameraRig>,
    player: Query<&Transform, (With<Player>, Without<AwaitingSpawn>)>,
) {
    let Ok(transform) = player.single() else {
        return;
    };
    rig.follow(screen_position(transform), time.delta_secs());
}

pub(crate) fn update_camera(
    time: Res<Time>,
    mut rng: ResMut<EffectsRng>,
    mut rig: ResMut<CameraRig>,
) {
    rig.update(time.delta_secs(), &mut rng.0);
}

pub(crate) fn shake_on_death(mut deaths: MessageReader<DeathEvent>, mut rig: ResMut<CameraRig>) {
    if deaths.read().count() > 0 {
        rig.shake(ShakePreset::Medium);
    }
}

/// The view center becomes the camera translation and zoom becomes the
/// orthographic scale, which zooms about the viewport center.
pub(crate) fn apply_camera_transform(
    rig: Res<CameraRig>,
    mut cameras: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    for (mut transform, mut projection) in &mut cameras {
        let z = transform.translation.z;
        transform.translation = scene_translation(rig.view_center(), z);
        if let Projection::Orthographic(ortho) = projection.as_mut() {
            let scale = 1.0 / rig.zoom.max(f32::EPSILON);
            if ortho.scale != scale {
                ortho.scale = scale;
            }
        }
    }
}
