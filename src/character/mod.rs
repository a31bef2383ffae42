//! Character domain: the physics-bodied player with double jump and respawn.
//!
//! Velocities on the body are avian's (+y up, px/s); positions handed to
//! other domains are screen space.

mod components;
mod events;
mod systems;
mod tuning;


pub use components::{
    AnimationState, AwaitingSpawn, Character, Facing, Player, PlayerVisual, RespawnPoint, approach,
    is_resting_on,
};
pub use events::{DeathEvent, JumpEvent, JumpKind, LandEvent, RespawnEvent};
pub use systems::{PLAYER_BODY_ID, PLAYER_Z, respawn_character, set_character_position};
pub use tuning::CharacterTuning;

use bevy::prelude::*;

use crate::content::RuntimeSettings;
use crate::core::TickSet;
use crate::character::systems::{
    apply_gravity, apply_horizontal_movement, apply_jump, check_death_boundary, detect_ground,
    spawn_player, sync_touch_jump, tick_respawn_freeze, update_animation,
};

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CharacterTuning>()
            .init_resource::<RespawnPoint>()
            .add_message::<JumpEvent>()
            .add_message::<LandEvent>()
            .add_message::<DeathEvent>()
            .add_message::<RespawnEvent>()
            .add_systems(Startup, (apply_character_tuning, spawn_player).chain())
            .add_systems(
                Update,
                (
                    detect_ground,
                    apply_horizontal_movement,
                    apply_jump,
                    apply_gravity,
                )
                    .chain()
                    .in_set(TickSet::Character),
            )
            .add_systems(
                Update,
                (check_death_boundary, tick_respawn_freeze)
                    .chain()
                    .in_set(TickSet::Death),
            )
            .add_systems(
                Update,
                (update_animation, sync_touch_jump).in_set(TickSet::Presentation),
            );
    }
}

fn apply_character_tuning(settings: Res<RuntimeSettings>, mut tuning: ResMut<CharacterTuning>) {
    *tuning = settings.character.clone();
    info!(
        "[CHARACTER] Tuning applied: jump height {:.0}px, {} jumps",
        tuning.single_jump_height(),
        tuning.max_jumps
    );
}
