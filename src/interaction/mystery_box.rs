//! Interaction domain: the mystery box state machine and its hit predicate.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::interaction::COLLECTIBLE_SIZE;
use crate::physics::Aabb;

pub const BOX_SIZE: f32 = 40.0;

/// Upper bound on the player's downward speed for a hit to count (px/s).
/// Admits the jump apex, rejects contact while clearly falling.
pub const HIT_VELOCITY_TOLERANCE: f32 = 120.0;

/// Solid contact keeps the bodies apart, so the overlap test uses a box grown
/// by this much (px).
pub const HIT_CONTACT_MARGIN: f32 = 4.0;

/// Offset of the collectible above the box's top edge (px).
pub const COLLECTIBLE_RISE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxState {
    #[default]
    Inactive,
    Hit,
    Completed,
}

impl BoxState {
    pub fn label(self) -> &'static str {
        match self {
            BoxState::Inactive => "inactive",
            BoxState::Hit => "hit",
            BoxState::Completed => "completed",
        }
    }

    pub fn color(self) -> Color {
        match self {
            BoxState::Inactive => Color::srgb(0.96, 0.76, 0.18),
            BoxState::Hit => Color::srgb(0.85, 0.45, 0.15),
            BoxState::Completed => Color::srgb(0.45, 0.5, 0.6),
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            BoxState::Inactive => "?",
            BoxState::Hit => "!",
            BoxState::Completed => "",
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct MysteryBox {
    /// Also the id of the project this box reveals
    pub id: String,
    pub rect: Aabb,
    pub state: BoxState,
    pub has_been_hit: bool,
    pub collectible_spawned: bool,
}

impl MysteryBox {
    pub fn new(id: impl Into<String>, top_left: Vec2) -> Self {
        Self {
            id: id.into(),
            rect: Aabb::from_top_left(top_left.x, top_left.y, BOX_SIZE, BOX_SIZE),
            state: BoxState::Inactive,
            has_been_hit: false,
            collectible_spawned: false,
        }
    }

    /// Place a box directly in a persisted state, with no animation.
    pub fn restored(id: impl Into<String>, top_left: Vec2, state: BoxState) -> Self {
        let mut mystery_box = Self::new(id, top_left);
        mystery_box.state = state;
        mystery_box.has_been_hit = state != BoxState::Inactive;
        mystery_box.collectible_spawned = state == BoxState::Hit;
        mystery_box
    }

    /// Overlap, player below the box center, and not clearly falling.
    /// `player_vy` is screen space (+y down).
    pub fn is_hit_from_below(&self, player: &Aabb, player_vy: f32) -> bool {
        self.rect.expanded(HIT_CONTACT_MARGIN).overlaps(player)
            && player.center().y > self.rect.center().y
            && player_vy < HIT_VELOCITY_TOLERANCE
    }

    /// inactive -> hit. Later hits are ignored.
    pub fn try_hit(&mut self) -> bool {
        if self.state != BoxState::Inactive {
            return false;
        }
        self.state = BoxState::Hit;
        self.has_been_hit = true;
        self.collectible_spawned = true;
        true
    }

    /// hit -> completed, once the collectible is taken.
    pub fn complete(&mut self) -> bool {
        if self.state != BoxState::Hit {
            return false;
        }
        self.state = BoxState::Completed;
        self.collectible_spawned = false;
        true
    }

    /// Top-left of the collectible this box releases.
    pub fn collectible_origin(&self) -> Vec2 {
        Vec2::new(
            self.rect.min.x + (self.rect.size().x - COLLECTIBLE_SIZE) / 2.0,
            self.rect.min.y - COLLECTIBLE_RISE,
        )
    }
}
