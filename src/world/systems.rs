//! World domain: per-tick platform motion, door hover and parallax scroll.

use avian2d::prelude::*;
use bevy::color::Mix;
use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::character::{AwaitingSpawn, Player};
use crate::physics::{engine_velocity, screen_position};
use crate::world::{
    Door, DoorLabel, DoorVisual, MovingPlatform, ParallaxBackground, ParallaxLayer, SKY_SLACK,
    SkyFill, layer_translation, place_background,
};

pub(crate) fn animate_platforms(
    time: Res<Time>,
    mut platforms: Query<(&mut MovingPlatform, &mut LinearVelocity)>,
) {
    for (mut platform, mut velocity) in &mut platforms {
        platform.elapsed += time.delta_secs();
        velocity.0 = engine_velocity(platform.velocity_at(platform.elapsed));
    }
}

pub(crate) fn update_door_hover(
    player: Query<&Transform, (With<Player>, Without<AwaitingSpawn>)>,
    mut doors: Query<(&mut Door, &Children)>,
    mut visuals: Query<&mut Sprite, With<DoorVisual>>,
    mut labels: Query<&mut Visibility, With<DoorLabel>>,
) {
    let Ok(transform) = player.single() else {
        return;
    };
    let center = screen_position(transform);

    for (mut door, children) in &mut doors {
        let hover = door.proximity(center);
        if (hover - door.hover).abs() < f32::EPSILON {
            continue;
        }
        door.hover = hover;
        for child in children.iter() {
            if let Ok(mut sprite) = visuals.get_mut(child) {
                sprite.color = door.theme.mix(&Color::WHITE, hover * 0.35);
            }
            if let Ok(mut visibility) = labels.get_mut(child) {
                *visibility = if hover > 0.0 {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
        }
    }
}

pub(crate) fn update_parallax(
    rig: Res<CameraRig>,
    mut roots: Query<&mut Transform, With<ParallaxBackground>>,
    mut layers: Query<(&ParallaxLayer, &mut Transform), Without<ParallaxBackground>>,
    mut skies: Query<
        &mut Transform,
        (With<SkyFill>, Without<ParallaxBackground>, Without<ParallaxLayer>),
    >,
) {
    for mut root in &mut roots {
        place_background(&mut root, rig.view_center(), rig.zoom);
    }
    for (layer, mut transform) in &mut layers {
        transform.translation = layer_translation(rig.position, layer.speed, rig.viewport, layer.z);
    }
    let sky_size = rig.viewport + Vec2::splat(SKY_SLACK);
    for mut transform in &mut skies {
        transform.scale = sky_size.extend(1.0);
    }
}
