//! Content domain: project catalog and runtime settings loaded at startup.

mod data;
mod loader;
mod registry;
mod validation;

#[cfg(test)]
mod tests;

pub use data::{DataFile, ProjectDef, RuntimeSettings, SpawnCoord};
pub use loader::{
    ContentLoadError, load_projects, load_runtime_settings, parse_projects,
    parse_runtime_settings,
};
pub use registry::ProjectCatalog;
pub use validation::{ValidationError, validate_catalog};

use bevy::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::core::LaunchOptions;

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProjectCatalog>()
            .init_resource::<RuntimeSettings>()
            .add_systems(PreStartup, load_content);
    }
}

fn load_content(
    options: Res<LaunchOptions>,
    mut catalog: ResMut<ProjectCatalog>,
    mut settings: ResMut<RuntimeSettings>,
) {
    match load_runtime_settings(&options.assets) {
        Ok(loaded) => {
            info!("[CONTENT] Runtime settings loaded, hub '{}'", loaded.hub_world);
            *settings = loaded;
        }
        Err(e) => warn!("[CONTENT] {} - using built-in defaults", e),
    }

    match load_projects(&options.assets) {
        Ok(loaded) => {
            info!("[CONTENT] {} projects loaded", loaded.len());
            *catalog = loaded;
        }
        Err(e) => error!("[CONTENT] {} - no mystery boxes will spawn", e),
    }

    let worlds = known_worlds(&options.assets);
    for problem in validate_catalog(&catalog, &worlds) {
        warn!("[CONTENT] {}", problem);
    }
}

/// Ids of every directory under configs/.
fn known_worlds(assets_root: &Path) -> HashSet<String> {
    let Ok(entries) = fs::read_dir(assets_root.join("configs")) else {
        return HashSet::new();
    };
    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect()
}
