//! Input domain: keyboard and touch folded into one debounced snapshot per tick.

mod bindings;
mod state;
mod systems;
mod touch;

#[cfg(test)]
mod tests;

pub use bindings::keyboard_actions;
pub use state::{Action, ActionSet, InputState};
pub use touch::{TouchButton, TouchPad};

use bevy::prelude::*;

use crate::core::{InputSampling, LaunchOptions};
use crate::input::systems::sample_input;
use crate::input::touch::{detect_touch_capability, read_touch_buttons, spawn_touch_pad};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        let touch_forced = app
            .world()
            .get_resource::<LaunchOptions>()
            .is_some_and(|options| options.touch);

        app.init_resource::<InputState>()
            .insert_resource(TouchPad {
                enabled: touch_forced,
                jump_available: true,
                ..default()
            })
            .add_systems(
                PreUpdate,
                (detect_touch_capability, read_touch_buttons, sample_input)
                    .chain()
                    .in_set(InputSampling),
            )
            .add_systems(Update, spawn_touch_pad);
    }
}
