//! World domain: data-driven worlds built from `configs/<id>/config.json`.

mod config;
mod door;
mod loader;
mod parallax;
mod runtime;
mod systems;

#[cfg(test)]
mod tests;

pub use config::{
    BackgroundDef, Dimensions, DoorDef, DoorKind, ElementDef, LayerDef, MysteryBoxLayout,
    PlatformDef, PlatformKind, PlatformMotionDef, SkyDef, SpawnPointDef, WorldConfig, parse_color,
};
pub use door::{DOOR_PROXIMITY_RANGE, Door, DoorLabel, DoorVisual};
pub use loader::{WorldLoadError, WorldLoader, is_valid_world_id, parse_world_config};
pub use parallax::{
    AssetMissing, BACKGROUND_Z, BackgroundBuilder, ParallaxBackground, ParallaxLayer, SKY_SLACK,
    SkyFill, layer_offset, layer_translation, place_background, sample_gradient,
};
pub use runtime::{
    BOUNDARY_THICKNESS, DEEP_FLOOR_DEPTH, InvisiblePlatform, MovingPlatform, Platform,
    WorldRuntime, boundary_rects, spawn_world,
};

use bevy::prelude::*;

use crate::core::{LaunchOptions, TickSet};
use crate::world::systems::{animate_platforms, update_door_hover, update_parallax};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        let assets = app
            .world()
            .get_resource::<LaunchOptions>()
            .map_or_else(|| LaunchOptions::default().assets, |o| o.assets.clone());

        app.insert_resource(WorldLoader::new(assets))
            .add_systems(Update, animate_platforms.in_set(TickSet::World))
            .add_systems(Update, update_door_hover.in_set(TickSet::Doors))
            .add_systems(Update, update_parallax.in_set(TickSet::Presentation));
    }
}
