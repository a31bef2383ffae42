//! Interaction domain: mystery boxes, their collectibles and the project modal.
//!
//! A box goes inactive -> hit -> completed. Every transition is written
//! through to the persisted state map before the tick renders.

mod animation;
mod collectible;
mod events;
mod modal;
mod mystery_box;
mod spawn;
mod store;
mod systems;

#[cfg(test)]
mod tests;

pub use animation::{BOUNCE_PEAK_SCALE, BOUNCE_PHASE_SECS, BoxBounce, BoxGlyph, BoxVisual};
pub use collectible::{COLLECTIBLE_SIZE, Collectible, CollectibleVisual};
pub use events::{
    BoxHitEvent, CollectibleCollectedEvent, ModalClosedEvent, ModalOpenedEvent, ResetRequest,
};
pub use modal::{MODAL_BREAKPOINT, ModalCloseButton, ModalLayout, ProjectModal, ProjectModalUI};
pub use mystery_box::{
    BOX_SIZE, BoxState, COLLECTIBLE_RISE, HIT_CONTACT_MARGIN, HIT_VELOCITY_TOLERANCE, MysteryBox,
};
pub use spawn::{
    BOX_Z, COLLECTIBLE_Z, collectible_body_id, mystery_box_body_id, spawn_collectible,
    spawn_mystery_box,
};
pub use store::{
    BoxStats, FileStorage, KeyValueStorage, MYSTERY_BOX_STATES_KEY, MemoryStorage,
    MysteryBoxStates, StoreError,
};

use bevy::prelude::*;

use crate::core::{LaunchOptions, TickSet};
use crate::interaction::systems::{
    animate_box_bounce, animate_collectibles, apply_reset, close_modal_on_input,
    collect_collectibles, detect_box_hits, open_modal_on_collect, relayout_modal,
    sync_box_visuals,
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MysteryBoxStates>()
            .init_resource::<ProjectModal>()
            .add_message::<BoxHitEvent>()
            .add_message::<CollectibleCollectedEvent>()
            .add_message::<ModalOpenedEvent>()
            .add_message::<ModalClosedEvent>()
            .add_message::<ResetRequest>()
            .add_systems(PreStartup, load_box_states)
            .add_systems(
                Update,
                (apply_reset, close_modal_on_input)
                    .chain()
                    .in_set(TickSet::Modal),
            )
            .add_systems(
                Update,
                (
                    detect_box_hits,
                    collect_collectibles,
                    open_modal_on_collect,
                    animate_box_bounce,
                    animate_collectibles,
                )
                    .chain()
                    .in_set(TickSet::Interaction),
            )
            .add_systems(
                Update,
                (sync_box_visuals, relayout_modal).in_set(TickSet::Presentation),
            );
    }
}

fn load_box_states(mut commands: Commands, options: Res<LaunchOptions>) {
    let storage = FileStorage::new(&options.data_dir);
    commands.insert_resource(MysteryBoxStates::load(storage));
}
