//! Conversion between screen space (+y down, used by configs and game logic)
//! and Bevy scene space (+y up, used by transforms and avian).

use bevy::prelude::*;

/// Screen-space point to scene-space point.
pub fn to_scene(point: Vec2) -> Vec2 {
    Vec2::new(point.x, -point.y)
}

/// Scene-space point to screen-space point.
pub fn to_screen(point: Vec2) -> Vec2 {
    Vec2::new(point.x, -point.y)
}

pub fn scene_translation(point: Vec2, z: f32) -> Vec3 {
    to_scene(point).extend(z)
}

/// Read a transform's position back into screen space.
pub fn screen_position(transform: &Transform) -> Vec2 {
    to_screen(transform.translation.truncate())
}

/// Engine velocity (+y up) to screen velocity (+y down).
pub fn screen_velocity(engine_velocity: Vec2) -> Vec2 {
    Vec2::new(engine_velocity.x, -engine_velocity.y)
}

/// Screen velocity (+y down) to engine velocity (+y up).
pub fn engine_velocity(screen_velocity: Vec2) -> Vec2 {
    Vec2::new(screen_velocity.x, -screen_velocity.y)
}
