//! Debug domain: UI components and layout helpers.

use bevy::prelude::*;

use crate::debug::diagnostic::DiagnosticSnapshot;
use crate::debug::state::DebugAction;

const PANEL_BG: Color = Color::srgba(0.08, 0.1, 0.14, 0.92);
const PANEL_BORDER: Color = Color::srgb(0.3, 0.45, 0.55);
const BUTTON_BG: Color = Color::srgb(0.16, 0.22, 0.3);
const BUTTON_BORDER: Color = Color::srgb(0.3, 0.4, 0.5);
const TEXT: Color = Color::srgb(0.9, 0.92, 0.95);
const ACCENT: Color = Color::srgb(0.45, 0.8, 0.95);
const HINT: Color = Color::srgb(0.55, 0.6, 0.68);
const STATUS: Color = Color::srgb(0.5, 0.9, 0.5);

/// Marker for the debug UI root
#[derive(Component, Debug)]
pub struct DebugUI;

/// Marker for the key/value readout text
#[derive(Component, Debug)]
pub struct DebugReadout;

/// Marker for status message text
#[derive(Component, Debug)]
pub struct DebugStatusMessage;

/// Debug panel button
#[derive(Component, Debug)]
pub struct DebugButton {
    pub action: DebugAction,
}

/// One `key: value` line per readout row.
pub fn format_readout(snapshot: &DiagnosticSnapshot) -> String {
    snapshot
        .readout()
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn label(text: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

pub(crate) fn spawn_debug_ui(commands: &mut Commands) {
    commands
        .spawn((
            DebugUI,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                top: Val::Px(16.0),
                width: Val::Px(300.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                row_gap: Val::Px(6.0),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(PANEL_BG),
            BorderColor::all(PANEL_BORDER),
            ZIndex(500),
        ))
        .with_children(|panel| {
            panel
                .spawn(Node {
                    justify_content: JustifyContent::SpaceBetween,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|title_row| {
                    title_row.spawn(label("DEBUG", 16.0, ACCENT));
                    spawn_debug_button(title_row, "X", DebugAction::Close);
                });

            panel.spawn(label("F1 panel | F2 grid | R reset", 11.0, HINT));
            panel.spawn((
                DebugStatusMessage,
                label("", 12.0, STATUS),
                Node {
                    min_height: Val::Px(14.0),
                    ..default()
                },
            ));
            panel.spawn((DebugReadout, label("Loading...", 12.0, TEXT)));

            panel
                .spawn(Node {
                    column_gap: Val::Px(6.0),
                    margin: UiRect::top(Val::Px(4.0)),
                    ..default()
                })
                .with_children(|actions| {
                    spawn_debug_button(actions, "Reset [R]", DebugAction::Reset);
                    spawn_debug_button(actions, "Grid [F2]", DebugAction::ToggleGrid);
                });
        });
}

fn spawn_debug_button(parent: &mut ChildSpawnerCommands, text: &str, action: DebugAction) {
    parent
        .spawn((
            DebugButton { action },
            Button,
            Node {
                padding: UiRect::axes(Val::Px(8.0), Val::Px(3.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(BUTTON_BG),
            BorderColor::all(BUTTON_BORDER),
        ))
        .with_child(label(text, 11.0, TEXT));
}
