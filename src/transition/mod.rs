//! Transition domain: moving the player between worlds by door, route,
//! history or reset.

mod manager;
mod route;
mod systems;


pub use manager::{
    ArrivalPlan, DoorLatch, TransitionCooldown, TransitionKind, TransitionManager,
    TransitionRequest, WorldEnteredEvent, WorldLoadFailed, ground_bottom, hub_camera_position,
    plan_arrival,
};
pub use route::{NavigationHistory, WorldRoute};
pub use systems::PendingWorldLoad;

use bevy::prelude::*;

use crate::core::TickSet;
use crate::transition::systems::{
    check_door_collisions, finish_world_load, navigate_history, request_hub_on_reset,
    request_initial_world, start_transitions,
};

pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TransitionManager>()
            .init_resource::<TransitionCooldown>()
            .init_resource::<DoorLatch>()
            .init_resource::<NavigationHistory>()
            .init_resource::<PendingWorldLoad>()
            .add_message::<TransitionRequest>()
            .add_message::<WorldEnteredEvent>()
            .add_message::<WorldLoadFailed>()
            .add_systems(PostStartup, request_initial_world)
            .add_systems(Update, check_door_collisions.in_set(TickSet::Doors))
            .add_systems(
                Update,
                (
                    request_hub_on_reset,
                    navigate_history,
                    start_transitions,
                    finish_world_load,
                )
                    .chain()
                    .in_set(TickSet::Transition),
            );
    }
}
