//! UI domain: the in-world HUD and the load-failure notice.

mod hud;
mod notice;

#[cfg(test)]
mod tests;

pub use hud::{
    HudRoot, MuteIndicator, ProjectsFoundText, WorldNameText, mute_label, projects_found_label,
};
pub use notice::{LoadFailureUI, RetryLoadButton};

use bevy::prelude::*;

use crate::core::TickSet;
use crate::ui::hud::{spawn_hud, update_mute_indicator, update_projects_found, update_world_name};
use crate::ui::notice::{clear_load_failure, handle_retry_load, show_load_failure};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud).add_systems(
            Update,
            (
                update_world_name,
                update_projects_found,
                update_mute_indicator,
                show_load_failure,
                handle_retry_load,
                clear_load_failure,
            )
                .in_set(TickSet::Presentation),
        );
    }
}
