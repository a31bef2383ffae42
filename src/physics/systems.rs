//! Physics bridge: debug-draw toggling.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::physics::PhysicsDebugSettings;

pub(crate) fn apply_physics_debug(
    settings: Res<PhysicsDebugSettings>,
    mut config_store: ResMut<GizmoConfigStore>,
) {
    if !settings.is_changed() {
        return;
    }

    let (config, _) = config_store.config_mut::<PhysicsGizmos>();
    config.enabled = settings.enabled;
    debug!("[PHYSICS] Debug draw {}", if settings.enabled { "on" } else { "off" });
}
