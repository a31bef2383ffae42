//! Input domain: snapshot sampling.

use bevy::prelude::*;

use crate::input::bindings::keyboard_actions;
use crate::input::state::{ActionSet, InputState};
use crate::input::touch::TouchPad;

/// Merge keyboard and touch into this tick's snapshot.
pub(crate) fn sample_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    pad: Res<TouchPad>,
    mut input: ResMut<InputState>,
) {
    let keys = keyboard_actions(&keyboard);
    let touch = pad.actions();
    let merged: ActionSet = [&keys, &touch]
        .into_iter()
        .flat_map(|set| set.iter())
        .collect();
    input.advance(merged);
}
