//! Interaction domain: tests for the box state machine, pickups and persistence.

use bevy::ecs::message::{MessageReader, Messages};
use bevy::ecs::system::SystemState;
use bevy::prelude::*;
use std::collections::BTreeMap;

use super::systems::{apply_reset, close_modal_on_input, open_modal_on_collect};
use super::{
    BOUNCE_PEAK_SCALE, BoxBounce, BoxState, Collectible, CollectibleCollectedEvent, FileStorage,
    KeyValueStorage, MYSTERY_BOX_STATES_KEY, MemoryStorage, ModalClosedEvent, ModalLayout,
    ModalOpenedEvent, MysteryBox, MysteryBoxStates, ProjectModal, ProjectModalUI, ResetRequest,
};
use crate::camera::{CameraMode, CameraRig};
use crate::content::ProjectCatalog;
use crate::core::{GameplayPaused, PAUSE_PROJECT_MODAL};
use crate::input::{Action, ActionSet, InputState};
use crate::physics::{Aabb, BodyRegistry};

/// First hub box: layout x 230, y 450.
fn hub_box() -> MysteryBox {
    MysteryBox::new("tide-tracker", Vec2::new(230.0, 450.0))
}

/// Player rect whose top edge sits `gap` px below the box bottom (490).
fn player_under_box(gap: f32) -> Aabb {
    Aabb::from_top_left(236.0, 490.0 + gap, 28.0, 44.0)
}

// -----------------------------------------------------------------------------
// Hit predicate tests
// -----------------------------------------------------------------------------

#[test]
fn test_hit_from_below_rising() {
    assert!(hub_box().is_hit_from_below(&player_under_box(1.0), -300.0));
}

#[test]
fn test_hit_from_below_at_apex() {
    assert!(hub_box().is_hit_from_below(&player_under_box(0.5), 119.0));
}

#[test]
fn test_hit_rejected_while_descending() {
    let mystery_box = hub_box();
    let player = player_under_box(-3.0);
    assert!(!mystery_box.is_hit_from_below(&player, 120.0));
    assert!(!mystery_box.is_hit_from_below(&player, 400.0));
}

#[test]
fn test_hit_rejected_when_standing_on_top() {
    let player = Aabb::from_top_left(236.0, 450.0 - 44.0, 28.0, 44.0);
    assert!(!hub_box().is_hit_from_below(&player, 0.0));
}

#[test]
fn test_hit_rejected_without_contact() {
    assert!(!hub_box().is_hit_from_below(&player_under_box(30.0), -300.0));
}

// -----------------------------------------------------------------------------
// State machine tests
// -----------------------------------------------------------------------------

#[test]
fn test_box_hit_once() {
    let mut mystery_box = hub_box();
    assert!(mystery_box.try_hit());
    assert_eq!(mystery_box.state, BoxState::Hit);
    assert!(mystery_box.has_been_hit);
    assert!(mystery_box.collectible_spawned);

    assert!(!mystery_box.try_hit());
    assert_eq!(mystery_box.state, BoxState::Hit);
}

#[test]
fn test_box_complete_requires_hit() {
    let mut mystery_box = hub_box();
    assert!(!mystery_box.complete());
    assert_eq!(mystery_box.state, BoxState::Inactive);

    mystery_box.try_hit();
    assert!(mystery_box.complete());
    assert_eq!(mystery_box.state, BoxState::Completed);
    assert!(!mystery_box.collectible_spawned);
}

#[test]
fn test_completed_box_never_changes() {
    let mut mystery_box = MysteryBox::restored("tide-tracker", Vec2::ZERO, BoxState::Completed);
    assert!(!mystery_box.try_hit());
    assert!(!mystery_box.complete());
    assert_eq!(mystery_box.state, BoxState::Completed);
}

#[test]
fn test_restored_flags_follow_state() {
    let hit = MysteryBox::restored("a", Vec2::ZERO, BoxState::Hit);
    assert!(hit.has_been_hit && hit.collectible_spawned);

    let inactive = MysteryBox::restored("b", Vec2::ZERO, BoxState::Inactive);
    assert!(!inactive.has_been_hit && !inactive.collectible_spawned);
}

// -----------------------------------------------------------------------------
// Collectible tests
// -----------------------------------------------------------------------------

#[test]
fn test_collectible_centered_above_box() {
    assert_eq!(hub_box().collectible_origin(), Vec2::new(242.0, 430.0));
}

#[test]
fn test_collectible_any_overlap_collects() {
    let collectible = Collectible::new("tide-tracker", Entity::PLACEHOLDER, Vec2::new(242.0, 430.0));
    let touching = Aabb::from_top_left(250.0, 440.0, 28.0, 44.0);
    let apart = Aabb::from_top_left(300.0, 440.0, 28.0, 44.0);

    assert!(collectible.is_collected_by(&touching));
    assert!(!collectible.is_collected_by(&apart));
}

// -----------------------------------------------------------------------------
// Animation job tests
// -----------------------------------------------------------------------------

#[test]
fn test_bounce_yoyo_scale() {
    let mut bounce = BoxBounce::default();
    assert_eq!(bounce.scale(), 1.0);

    bounce.advance(0.05);
    assert!((bounce.scale() - 1.05).abs() < 1e-4);

    bounce.advance(0.05);
    assert!((bounce.scale() - BOUNCE_PEAK_SCALE).abs() < 1e-4);

    bounce.advance(0.05);
    assert!((bounce.scale() - 1.05).abs() < 1e-4);

    bounce.advance(0.06);
    assert!(bounce.is_finished());
    assert_eq!(bounce.scale(), 1.0);
}

// -----------------------------------------------------------------------------
// Persistence tests
// -----------------------------------------------------------------------------

fn persisted_map(states: &MysteryBoxStates) -> BTreeMap<String, BoxState> {
    let raw = states.persisted().unwrap_or_default();
    serde_json::from_str(&raw).unwrap_or_default()
}

#[test]
fn test_store_starts_empty_without_record() {
    let states = MysteryBoxStates::load(MemoryStorage::default());
    assert_eq!(states.get("anything"), BoxState::Inactive);
    assert_eq!(states.iter().count(), 0);
}

#[test]
fn test_store_reads_persisted_record() {
    let storage = MemoryStorage::with_entry(
        MYSTERY_BOX_STATES_KEY,
        r#"{"tide-tracker":"completed","dune-mapper":"hit"}"#,
    );
    let states = MysteryBoxStates::load(storage);
    assert_eq!(states.get("tide-tracker"), BoxState::Completed);
    assert_eq!(states.get("dune-mapper"), BoxState::Hit);
}

#[test]
fn test_store_corrupt_record_starts_empty() {
    let storage = MemoryStorage::with_entry(MYSTERY_BOX_STATES_KEY, "{not json");
    let states = MysteryBoxStates::load(storage);
    assert_eq!(states.iter().count(), 0);
}

#[test]
fn test_store_writes_through_on_every_set() {
    let mut states = MysteryBoxStates::load(MemoryStorage::default());
    states.set("tide-tracker", BoxState::Hit);
    assert_eq!(persisted_map(&states).get("tide-tracker"), Some(&BoxState::Hit));

    states.set("tide-tracker", BoxState::Completed);
    let persisted = persisted_map(&states);
    assert_eq!(persisted.get("tide-tracker"), Some(&BoxState::Completed));
    assert_eq!(persisted.len(), states.iter().count());
}

#[test]
fn test_store_reset_is_idempotent() {
    let mut states = MysteryBoxStates::load(MemoryStorage::default());
    states.set("a", BoxState::Completed);
    states.set("b", BoxState::Completed);

    states.reset();
    let first = states.persisted();
    states.reset();

    assert_eq!(states.persisted(), first);
    assert!(persisted_map(&states).is_empty());
    assert_eq!(states.get("a"), BoxState::Inactive);
}

#[test]
fn test_store_stats_count_unknown_as_inactive() {
    let mut states = MysteryBoxStates::load(MemoryStorage::default());
    states.set("a", BoxState::Hit);
    states.set("b", BoxState::Completed);

    let stats = states.stats(["a", "b", "c"]);
    assert_eq!((stats.inactive, stats.hit, stats.completed), (1, 1, 1));
    assert_eq!(stats.total(), 3);
}

#[test]
fn test_file_storage_survives_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut states = MysteryBoxStates::load(FileStorage::new(dir.path().join("saves")));
        states.set("tide-tracker", BoxState::Completed);
    }
    let states = MysteryBoxStates::load(FileStorage::new(dir.path().join("saves")));
    assert_eq!(states.get("tide-tracker"), BoxState::Completed);
}

#[test]
fn test_file_storage_missing_key_reads_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = FileStorage::new(dir.path());
    assert!(matches!(storage.read("missing"), Ok(None)));
}

// -----------------------------------------------------------------------------
// Modal tests
// -----------------------------------------------------------------------------

#[test]
fn test_modal_single_open() {
    let mut modal = ProjectModal::default();
    assert!(modal.open("tide-tracker"));
    assert!(!modal.open("dune-mapper"));
    assert_eq!(modal.project_id(), Some("tide-tracker"));

    assert_eq!(modal.close().as_deref(), Some("tide-tracker"));
    assert!(!modal.is_open());
    assert_eq!(modal.close(), None);
}

#[test]
fn test_modal_layout_breakpoint() {
    assert_eq!(ModalLayout::for_width(1280.0), ModalLayout::Side);
    assert_eq!(ModalLayout::for_width(768.0), ModalLayout::Side);
    assert_eq!(ModalLayout::for_width(600.0), ModalLayout::BottomSheet);
}

// -----------------------------------------------------------------------------
// Modal and reset system tests
// -----------------------------------------------------------------------------

fn modal_world() -> World {
    let mut world = World::new();
    world.init_resource::<InputState>();
    world.init_resource::<ProjectModal>();
    world.init_resource::<GameplayPaused>();
    world.init_resource::<CameraRig>();
    world.init_resource::<ProjectCatalog>();
    world.init_resource::<BodyRegistry>();
    world.insert_resource(MysteryBoxStates::load(MemoryStorage::default()));
    world.init_resource::<Messages<CollectibleCollectedEvent>>();
    world.init_resource::<Messages<ModalOpenedEvent>>();
    world.init_resource::<Messages<ModalClosedEvent>>();
    world.init_resource::<Messages<ResetRequest>>();
    world
}

/// Camera modal framing holds exactly while gameplay is paused.
fn assert_modal_matches_pause(world: &World) {
    let paused = world.resource::<GameplayPaused>().is_paused();
    let rig = world.resource::<CameraRig>();
    assert_eq!(rig.is_modal(), paused);
    assert_eq!(world.resource::<ProjectModal>().is_open(), paused);
}

fn count_closed(world: &mut World) -> usize {
    let mut state = SystemState::<MessageReader<ModalClosedEvent>>::new(world);
    let mut reader = state.get_mut(world);
    reader.read().count()
}

fn open_via_collect(world: &mut World, box_id: &str) {
    world
        .resource_mut::<Messages<CollectibleCollectedEvent>>()
        .write(CollectibleCollectedEvent {
            box_id: box_id.to_string(),
            position: Vec2::new(250.0, 422.0),
        });
    let open = world.register_system(open_modal_on_collect);
    world.run_system(open).unwrap();
}

#[test]
fn test_space_closes_modal_without_jumping() {
    let mut world = modal_world();
    assert_modal_matches_pause(&world);

    open_via_collect(&mut world, "tide-tracker");
    assert!(world.resource::<GameplayPaused>().is_paused());
    assert_modal_matches_pause(&world);
    let mut panels = world.query_filtered::<Entity, With<ProjectModalUI>>();
    assert_eq!(panels.iter(&world).count(), 1);

    // Space is both the close key and the jump key.
    world
        .resource_mut::<InputState>()
        .advance([Action::Jump, Action::CloseModal].into_iter().collect::<ActionSet>());
    let close = world.register_system(close_modal_on_input);
    world.run_system(close).unwrap();

    assert!(!world.resource::<GameplayPaused>().is_paused());
    assert_modal_matches_pause(&world);
    assert_eq!(panels.iter(&world).count(), 0);
    assert_eq!(count_closed(&mut world), 1);
    let input = world.resource::<InputState>();
    assert!(!input.was_just_pressed(Action::Jump));
    assert!(input.is_pressed(Action::Jump));
}

#[test]
fn test_modal_stays_open_without_close_input() {
    let mut world = modal_world();
    open_via_collect(&mut world, "tide-tracker");

    world
        .resource_mut::<InputState>()
        .advance([Action::Left].into_iter().collect::<ActionSet>());
    let close = world.register_system(close_modal_on_input);
    world.run_system(close).unwrap();

    assert!(world.resource::<ProjectModal>().is_open());
    assert_modal_matches_pause(&world);
}

#[test]
fn test_reset_restores_boxes_store_and_camera() {
    let mut world = modal_world();
    let mut hit_box = hub_box();
    assert!(hit_box.try_hit());
    let mut done_box = MysteryBox::new("dune-mapper", Vec2::new(430.0, 450.0));
    assert!(done_box.try_hit());
    assert!(done_box.complete());
    {
        let mut store = world.resource_mut::<MysteryBoxStates>();
        store.set("tide-tracker", BoxState::Hit);
        store.set("dune-mapper", BoxState::Completed);
    }
    world.spawn((hit_box, BoxBounce::default()));
    world.spawn(done_box);

    open_via_collect(&mut world, "dune-mapper");
    world.resource_mut::<CameraRig>().zoom = 1.3;

    world.resource_mut::<Messages<ResetRequest>>().write(ResetRequest);
    let reset = world.register_system(apply_reset);
    world.run_system(reset).unwrap();

    let store = world.resource::<MysteryBoxStates>();
    assert_eq!(store.iter().count(), 0);
    assert_eq!(store.persisted().as_deref(), Some("{}"));

    let mut boxes = world.query::<(&MysteryBox, Option<&BoxBounce>)>();
    assert_eq!(boxes.iter(&world).count(), 2);
    for (mystery_box, bounce) in boxes.iter(&world) {
        assert_eq!(mystery_box.state, BoxState::Inactive);
        assert!(!mystery_box.has_been_hit);
        assert!(!mystery_box.collectible_spawned);
        assert!(bounce.is_none());
    }

    let rig = world.resource::<CameraRig>();
    assert_eq!(rig.mode, CameraMode::Follow);
    assert_eq!(rig.zoom, rig.tuning().base_zoom);
    assert_eq!(rig.target_zoom, rig.tuning().base_zoom);
    assert!(!world.resource::<ProjectModal>().is_open());
    assert!(!world.resource::<GameplayPaused>().is_paused());
    assert_modal_matches_pause(&world);
    assert_eq!(count_closed(&mut world), 1);
}

#[test]
fn test_reset_drops_every_pause_source() {
    let mut world = modal_world();
    world.resource_mut::<GameplayPaused>().pause(PAUSE_PROJECT_MODAL);
    world.resource_mut::<GameplayPaused>().pause("menu");

    world.resource_mut::<Messages<ResetRequest>>().write(ResetRequest);
    let reset = world.register_system(apply_reset);
    world.run_system(reset).unwrap();

    assert!(!world.resource::<GameplayPaused>().is_paused());
    assert_eq!(count_closed(&mut world), 0);
}
