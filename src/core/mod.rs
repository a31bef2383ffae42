//! Core domain: the game loop's ordering, timing and pause model.
//!
//! Input is sampled in `PreUpdate`, avian steps in `FixedPostUpdate`, and the
//! remaining per-tick work runs in `Update` in the fixed order of [`TickSet`].

mod options;
mod resources;
mod state;
mod systems;


pub use options::LaunchOptions;
pub use resources::{EffectsRng, MAX_FRAME_SECS, SessionStats};
pub use state::{GameplayPaused, PAUSE_PROJECT_MODAL, gameplay_active};

use bevy::prelude::*;

use crate::core::systems::{configure_loop_timing, sync_physics_pause, tick_session_stats};

/// Per-tick ordering of gameplay work inside `Update`.
///
/// `Modal` always runs so an open project modal can be closed while paused;
/// `Character` through `Death` only run while gameplay is active. World swaps
/// land in `Transition` whatever the pause state, and the camera and
/// presentation sets always run so the last frame keeps rendering.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum TickSet {
    Modal,
    Character,
    Interaction,
    World,
    Doors,
    Death,
    Transition,
    CameraFollow,
    CameraUpdate,
    Presentation,
}

/// Input sampling inside `PreUpdate`.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub struct InputSampling;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameplayPaused>()
            .init_resource::<SessionStats>()
            .init_resource::<EffectsRng>()
            .configure_sets(
                Update,
                (
                    TickSet::Modal,
                    TickSet::Character,
                    TickSet::Interaction,
                    TickSet::World,
                    TickSet::Doors,
                    TickSet::Death,
                    TickSet::Transition,
                    TickSet::CameraFollow,
                    TickSet::CameraUpdate,
                    TickSet::Presentation,
                )
                    .chain(),
            )
            .configure_sets(
                Update,
                (
                    TickSet::Character,
                    TickSet::Interaction,
                    TickSet::World,
                    TickSet::Doors,
                    TickSet::Death,
                )
                    .run_if(gameplay_active),
            )
            .add_systems(PreUpdate, sync_physics_pause.after(InputSampling))
            .add_systems(Startup, configure_loop_timing)
            .add_systems(First, tick_session_stats);
    }
}
