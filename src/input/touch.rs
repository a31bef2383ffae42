//! Input domain: on-screen virtual pad for touch devices.

use bevy::prelude::*;

use crate::input::state::{Action, ActionSet};

const BUTTON_SIZE: f32 = 72.0;
const BUTTON_MARGIN: f32 = 24.0;
const BUTTON_IDLE: Color = Color::srgba(1.0, 1.0, 1.0, 0.25);
const BUTTON_HELD: Color = Color::srgba(1.0, 1.0, 1.0, 0.5);
const BUTTON_DISABLED: Color = Color::srgba(0.4, 0.4, 0.4, 0.15);

/// State of the virtual pad.
#[derive(Resource, Debug, Default)]
pub struct TouchPad {
    /// Whether the pad is shown and sampled.
    pub enabled: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Cleared by the character domain when no jumps remain. Only dims the
    /// button; the held state is always reported so a hold never re-fires.
    pub jump_available: bool,
}

impl TouchPad {
    pub fn actions(&self) -> ActionSet {
        let mut actions = ActionSet::default();
        if !self.enabled {
            return actions;
        }
        if self.left {
            actions.insert(Action::Left);
        }
        if self.right {
            actions.insert(Action::Right);
        }
        if self.jump {
            actions.insert(Action::Jump);
        }
        actions
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Left,
    Right,
    Jump,
}

/// Marker for the pad's root node
#[derive(Component, Debug)]
pub struct TouchPadUI;

/// Turn the pad on at the first observed touch.
pub(crate) fn detect_touch_capability(touches: Res<Touches>, mut pad: ResMut<TouchPad>) {
    if !pad.enabled && touches.any_just_pressed() {
        pad.enabled = true;
        info!("[INPUT] Touch detected, enabling virtual pad");
    }
}

pub(crate) fn spawn_touch_pad(
    mut commands: Commands,
    pad: Res<TouchPad>,
    existing: Query<Entity, With<TouchPadUI>>,
) {
    if !pad.enabled || !existing.is_empty() {
        return;
    }

    commands
        .spawn((
            TouchPadUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                bottom: Val::Px(BUTTON_MARGIN),
                padding: UiRect::horizontal(Val::Px(BUTTON_MARGIN)),
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            ZIndex(400),
        ))
        .with_children(|root| {
            root.spawn(Node {
                column_gap: Val::Px(16.0),
                ..default()
            })
            .with_children(|dpad| {
                spawn_touch_button(dpad, TouchButton::Left, "<");
                spawn_touch_button(dpad, TouchButton::Right, ">");
            });
            spawn_touch_button(root, TouchButton::Jump, "^");
        });
}

fn spawn_touch_button(parent: &mut ChildSpawnerCommands, kind: TouchButton, label: &str) {
    parent
        .spawn((
            Button,
            kind,
            Node {
                width: Val::Px(BUTTON_SIZE),
                height: Val::Px(BUTTON_SIZE),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub(crate) fn read_touch_buttons(
    mut pad: ResMut<TouchPad>,
    mut buttons: Query<(&Interaction, &TouchButton, &mut BackgroundColor)>,
) {
    if !pad.enabled {
        return;
    }

    let (mut left, mut right, mut jump) = (false, false, false);
    for (interaction, kind, mut color) in &mut buttons {
        let held = *interaction == Interaction::Pressed;
        match kind {
            TouchButton::Left => left |= held,
            TouchButton::Right => right |= held,
            TouchButton::Jump => jump |= held,
        }

        color.0 = if *kind == TouchButton::Jump && !pad.jump_available {
            BUTTON_DISABLED
        } else if held {
            BUTTON_HELD
        } else {
            BUTTON_IDLE
        };
    }

    pad.left = left;
    pad.right = right;
    pad.jump = jump;
}
