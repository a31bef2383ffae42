//! Input domain: keyboard bindings.

use bevy::prelude::*;

use crate::input::state::{Action, ActionSet};

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];
const UP_KEYS: [KeyCode; 2] = [KeyCode::ArrowUp, KeyCode::KeyW];
const VOLUME_UP_KEYS: [KeyCode; 2] = [KeyCode::Equal, KeyCode::NumpadAdd];
const VOLUME_DOWN_KEYS: [KeyCode; 2] = [KeyCode::Minus, KeyCode::NumpadSubtract];

/// Actions held on the keyboard this tick.
///
/// While Alt is held the horizontal arrows act as history back/forward and do
/// not move the character.
pub fn keyboard_actions(keyboard: &ButtonInput<KeyCode>) -> ActionSet {
    let mut actions = ActionSet::default();
    let alt = keyboard.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]);

    if alt {
        if keyboard.pressed(KeyCode::ArrowLeft) {
            actions.insert(Action::NavigateBack);
        }
        if keyboard.pressed(KeyCode::ArrowRight) {
            actions.insert(Action::NavigateForward);
        }
    } else {
        if keyboard.any_pressed(LEFT_KEYS) {
            actions.insert(Action::Left);
        }
        if keyboard.any_pressed(RIGHT_KEYS) {
            actions.insert(Action::Right);
        }
    }

    if keyboard.any_pressed(UP_KEYS) {
        actions.insert(Action::Up);
        actions.insert(Action::Jump);
    }
    if keyboard.pressed(KeyCode::Space) {
        actions.insert(Action::Jump);
        actions.insert(Action::CloseModal);
    }
    if keyboard.pressed(KeyCode::Escape) {
        actions.insert(Action::CloseModal);
    }

    let toggles = [
        (KeyCode::F1, Action::ToggleDebug),
        (KeyCode::F2, Action::ToggleGrid),
        (KeyCode::KeyM, Action::ToggleMute),
        (KeyCode::KeyB, Action::StartMusic),
        (KeyCode::KeyR, Action::Reset),
    ];
    for (key, action) in toggles {
        if keyboard.pressed(key) {
            actions.insert(action);
        }
    }
    if keyboard.any_pressed(VOLUME_UP_KEYS) {
        actions.insert(Action::VolumeUp);
    }
    if keyboard.any_pressed(VOLUME_DOWN_KEYS) {
        actions.insert(Action::VolumeDown);
    }

    actions
}
