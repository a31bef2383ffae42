//! Interaction domain: the single-use pickup released by a hit box.

use bevy::prelude::*;

use crate::physics::Aabb;

pub const COLLECTIBLE_SIZE: f32 = 16.0;

const BOB_AMPLITUDE: f32 = 4.0;
const BOB_SPEED: f32 = 3.0;

#[derive(Component, Debug, Clone)]
pub struct Collectible {
    /// Box (and project) this pickup belongs to
    pub box_id: String,
    pub box_entity: Entity,
    pub rect: Aabb,
    pub elapsed: f32,
}

impl Collectible {
    pub fn new(box_id: impl Into<String>, box_entity: Entity, top_left: Vec2) -> Self {
        Self {
            box_id: box_id.into(),
            box_entity,
            rect: Aabb::from_top_left(top_left.x, top_left.y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE),
            elapsed: 0.0,
        }
    }

    /// Any overlap collects; there is no velocity condition.
    pub fn is_collected_by(&self, player: &Aabb) -> bool {
        self.rect.overlaps(player)
    }

    /// Vertical offset of the drawn sprite; the pickup area does not move.
    pub fn bob_offset(&self) -> f32 {
        (self.elapsed * BOB_SPEED).sin() * BOB_AMPLITUDE
    }
}

/// Marker for the drawn child of a collectible.
#[derive(Component, Debug)]
pub struct CollectibleVisual;
