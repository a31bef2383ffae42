//! Debug mode for inspecting a running world.
//!
//! Features:
//! - F1 readout panel with collider outlines and invisible platforms shown
//! - F2 coordinate grid
//! - R (while the panel is open) for a full reset
//! - `--diagnostic` JSON snapshot logging on game events

mod diagnostic;
mod state;
mod systems;
mod ui;

#[cfg(test)]
mod tests;

pub use diagnostic::{
    AudioSnapshot, BoxSnapshot, CameraSnapshot, DiagnosticHandle, DiagnosticSnapshot,
    PlayerSnapshot,
};
pub use state::{DebugAction, DebugState, GRID_SPACING, grid_lines};
pub use ui::{DebugButton, DebugReadout, DebugUI, format_readout};

use bevy::prelude::*;

use crate::core::{LaunchOptions, TickSet};
use crate::debug::systems::{
    draw_debug_grid, handle_debug_buttons, handle_debug_hotkeys, log_diagnostic_events,
    refresh_diagnostics, reveal_new_invisible_platforms, toggle_debug_hud, update_debug_readout,
    update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        let logging = app
            .world()
            .get_resource::<LaunchOptions>()
            .is_some_and(|options| options.diagnostic);
        if logging {
            info!("[DIAG] Diagnostic logging enabled");
        }

        app.init_resource::<DebugState>()
            .insert_resource(DiagnosticHandle {
                logging,
                ..default()
            })
            .add_systems(
                Update,
                (
                    toggle_debug_hud,
                    reveal_new_invisible_platforms,
                    handle_debug_hotkeys,
                    handle_debug_buttons,
                    update_status_message,
                    refresh_diagnostics,
                    update_debug_readout,
                    log_diagnostic_events,
                    draw_debug_grid,
                )
                    .chain()
                    .in_set(TickSet::Presentation),
            );
    }
}
