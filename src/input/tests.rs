//! Input domain: tests for snapshots, edges, bindings and the touch pad.

use bevy::prelude::*;

use super::{Action, ActionSet, InputState, TouchPad, keyboard_actions};

fn set(actions: &[Action]) -> ActionSet {
    actions.iter().copied().collect()
}

// -----------------------------------------------------------------------------
// Edge detection tests
// -----------------------------------------------------------------------------

#[test]
fn test_edge_fires_once_per_press() {
    let mut input = InputState::default();

    input.advance(set(&[Action::Jump]));
    assert!(input.is_pressed(Action::Jump));
    assert!(input.was_just_pressed(Action::Jump));

    // Held: pressed but no new edge
    input.advance(set(&[Action::Jump]));
    assert!(input.is_pressed(Action::Jump));
    assert!(!input.was_just_pressed(Action::Jump));

    // Released then pressed again: new edge
    input.advance(ActionSet::default());
    input.advance(set(&[Action::Jump]));
    assert!(input.was_just_pressed(Action::Jump));
}

#[test]
fn test_consume_suppresses_edge_for_current_tick_only() {
    let mut input = InputState::default();
    input.advance(set(&[Action::Jump, Action::CloseModal]));
    input.consume(Action::Jump);

    assert!(!input.was_just_pressed(Action::Jump));
    assert!(input.was_just_pressed(Action::CloseModal));
    // Still reported as held
    assert!(input.is_pressed(Action::Jump));

    // Holding through the next tick produces no late edge
    input.advance(set(&[Action::Jump]));
    assert!(!input.was_just_pressed(Action::Jump));
}

#[test]
fn test_horizontal_axis() {
    let mut input = InputState::default();
    input.advance(set(&[Action::Left]));
    assert_eq!(input.horizontal_axis(), -1.0);
    input.advance(set(&[Action::Right]));
    assert_eq!(input.horizontal_axis(), 1.0);
    input.advance(set(&[Action::Left, Action::Right]));
    assert_eq!(input.horizontal_axis(), 0.0);
}

#[test]
fn test_any_just_pressed() {
    let mut input = InputState::default();
    input.advance(ActionSet::default());
    assert!(!input.any_just_pressed());
    input.advance(set(&[Action::ToggleMute]));
    assert!(input.any_just_pressed());
    input.advance(set(&[Action::ToggleMute]));
    assert!(!input.any_just_pressed());
}

// -----------------------------------------------------------------------------
// Keyboard binding tests
// -----------------------------------------------------------------------------

fn keyboard_with(keys: &[KeyCode]) -> ButtonInput<KeyCode> {
    let mut keyboard = ButtonInput::<KeyCode>::default();
    for key in keys {
        keyboard.press(*key);
    }
    keyboard
}

#[test]
fn test_movement_bindings() {
    let actions = keyboard_actions(&keyboard_with(&[KeyCode::KeyA]));
    assert!(actions.contains(Action::Left));

    let actions = keyboard_actions(&keyboard_with(&[KeyCode::ArrowRight]));
    assert!(actions.contains(Action::Right));
}

#[test]
fn test_jump_bindings() {
    for key in [KeyCode::ArrowUp, KeyCode::KeyW, KeyCode::Space] {
        let actions = keyboard_actions(&keyboard_with(&[key]));
        assert!(actions.contains(Action::Jump), "{key:?} should jump");
    }
}

#[test]
fn test_space_and_escape_close_modal() {
    assert!(keyboard_actions(&keyboard_with(&[KeyCode::Space])).contains(Action::CloseModal));
    assert!(keyboard_actions(&keyboard_with(&[KeyCode::Escape])).contains(Action::CloseModal));
    assert!(!keyboard_actions(&keyboard_with(&[KeyCode::KeyW])).contains(Action::CloseModal));
}

#[test]
fn test_hotkey_bindings() {
    let cases = [
        (KeyCode::F1, Action::ToggleDebug),
        (KeyCode::F2, Action::ToggleGrid),
        (KeyCode::KeyM, Action::ToggleMute),
        (KeyCode::Equal, Action::VolumeUp),
        (KeyCode::NumpadAdd, Action::VolumeUp),
        (KeyCode::Minus, Action::VolumeDown),
        (KeyCode::NumpadSubtract, Action::VolumeDown),
        (KeyCode::KeyB, Action::StartMusic),
        (KeyCode::KeyR, Action::Reset),
    ];
    for (key, action) in cases {
        assert!(
            keyboard_actions(&keyboard_with(&[key])).contains(action),
            "{key:?} should map to {action:?}"
        );
    }
}

#[test]
fn test_alt_arrows_navigate_instead_of_moving() {
    let actions = keyboard_actions(&keyboard_with(&[KeyCode::AltLeft, KeyCode::ArrowLeft]));
    assert!(actions.contains(Action::NavigateBack));
    assert!(!actions.contains(Action::Left));

    let actions = keyboard_actions(&keyboard_with(&[KeyCode::AltRight, KeyCode::ArrowRight]));
    assert!(actions.contains(Action::NavigateForward));
    assert!(!actions.contains(Action::Right));
}

// -----------------------------------------------------------------------------
// TouchPad tests
// -----------------------------------------------------------------------------

#[test]
fn test_touch_pad_disabled_reports_nothing() {
    let pad = TouchPad {
        enabled: false,
        left: true,
        jump: true,
        jump_available: true,
        ..default()
    };
    assert!(pad.actions().is_empty());
}

#[test]
fn test_touch_pad_reports_held_jump_without_jumps() {
    let pad = TouchPad {
        enabled: true,
        right: true,
        jump: true,
        jump_available: false,
        ..default()
    };
    let actions = pad.actions();
    assert!(actions.contains(Action::Right));
    assert!(actions.contains(Action::Jump));
}

#[test]
fn test_touch_jump_held_through_landing_fires_once() {
    let mut pad = TouchPad {
        enabled: true,
        jump: true,
        jump_available: true,
        ..default()
    };
    let mut input = InputState::default();

    input.advance(pad.actions());
    assert!(input.was_just_pressed(Action::Jump));

    // Both jumps spent while the button stays down.
    pad.jump_available = false;
    input.advance(pad.actions());
    assert!(!input.was_just_pressed(Action::Jump));

    // Landing re-enables the button; still held, so no new edge.
    pad.jump_available = true;
    input.advance(pad.actions());
    assert!(!input.was_just_pressed(Action::Jump));

    pad.jump = false;
    input.advance(pad.actions());
    pad.jump = true;
    input.advance(pad.actions());
    assert!(input.was_just_pressed(Action::Jump));
}
