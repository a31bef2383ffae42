//! Physics bridge: wraps avian2d behind named bodies and screen-space helpers.

mod aabb;
mod coords;
mod registry;
mod systems;

#[cfg(test)]
mod tests;

pub use aabb::Aabb;
pub use coords::{
    engine_velocity, scene_translation, screen_position, screen_velocity, to_scene, to_screen,
};
pub use registry::{
    BodyLabel, BodyRegistry, BodyRegistryError, BodyTag, despawn_body, spawn_body,
};

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::physics::systems::apply_physics_debug;

pub const PLATFORM_FRICTION: f32 = 0.8;
pub const PLATFORM_RESTITUTION: f32 = 0.1;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Solid surfaces the player stands on or bumps into
    Ground,
    /// Player character
    Player,
    /// Triggers (doors, collectibles) - never block movement
    Sensor,
}

/// Whether avian's collider outlines are drawn.
#[derive(Resource, Debug, Default)]
pub struct PhysicsDebugSettings {
    pub enabled: bool,
}

/// Static solid body covering `rect` (screen space), with platform material.
pub fn static_solid(rect: Aabb, z: f32) -> impl Bundle {
    let size = rect.size();
    (
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        Friction::new(PLATFORM_FRICTION),
        Restitution::new(PLATFORM_RESTITUTION),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
        Transform::from_translation(scene_translation(rect.center(), z)),
    )
}

/// Kinematic solid for platforms that move along a scripted path.
pub fn kinematic_solid(rect: Aabb, z: f32) -> impl Bundle {
    let size = rect.size();
    (
        RigidBody::Kinematic,
        Collider::rectangle(size.x, size.y),
        Friction::new(PLATFORM_FRICTION),
        Restitution::new(PLATFORM_RESTITUTION),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
        LinearVelocity::ZERO,
        Transform::from_translation(scene_translation(rect.center(), z)),
    )
}

/// Static trigger volume covering `rect` (screen space).
pub fn static_sensor(rect: Aabb, z: f32) -> impl Bundle {
    let size = rect.size();
    (
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        Sensor,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
        Transform::from_translation(scene_translation(rect.center(), z)),
    )
}

pub struct PhysicsBridgePlugin;

impl Plugin for PhysicsBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            PhysicsPlugins::default().with_length_unit(32.0),
            PhysicsDebugPlugin::default(),
        ))
        .init_resource::<BodyRegistry>()
        .init_resource::<PhysicsDebugSettings>()
        .add_systems(Update, apply_physics_debug);
    }
}
