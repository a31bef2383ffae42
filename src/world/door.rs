//! World domain: doors between worlds.

use bevy::prelude::*;

use crate::physics::Aabb;
use crate::world::DoorKind;

/// Distance (px) over which a door's hover highlight fades in.
pub const DOOR_PROXIMITY_RANGE: f32 = 120.0;

#[derive(Component, Debug, Clone)]
pub struct Door {
    pub key: String,
    pub name: String,
    pub target_world: String,
    pub kind: DoorKind,
    pub theme: Color,
    /// Screen-space spawn in the target world, overriding its default
    pub spawn: Option<Vec2>,
    pub rect: Aabb,
    /// Hover strength in `0..=1`, refreshed every tick
    pub hover: f32,
}

impl Door {
    /// 1 when touching, falling linearly to 0 at the proximity range.
    pub fn proximity(&self, player_center: Vec2) -> f32 {
        let distance = self.rect.distance_to(player_center);
        (1.0 - distance / DOOR_PROXIMITY_RANGE).clamp(0.0, 1.0)
    }

    pub fn overlaps(&self, player: &Aabb) -> bool {
        self.rect.overlaps(player)
    }
}

/// Drawn panel of a door; brightens with hover.
#[derive(Component, Debug)]
pub struct DoorVisual;

/// Name plate floating above a door.
#[derive(Component, Debug)]
pub struct DoorLabel;
