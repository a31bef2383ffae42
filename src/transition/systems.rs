//! Transition domain: starting, finishing and triggering world swaps.
//!
//! A swap is split over frames: the request claims the manager and starts the
//! config read on the async pool, and the world is only torn down once the new
//! config is in hand, so a missing world never leaves the player in limbo.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task, block_on, futures_lite::future};
use bevy::window::PrimaryWindow;
use std::path::Path;

use crate::camera::CameraRig;
use crate::character::{
    AwaitingSpawn, Character, CharacterTuning, Player, RespawnPoint, respawn_character,
};
use crate::content::{ProjectCatalog, RuntimeSettings};
use crate::core::{GameplayPaused, LaunchOptions};
use crate::input::{Action, InputState, TouchPad};
use crate::interaction::{MysteryBoxStates, ResetRequest};
use crate::physics::{Aabb, BodyRegistry, screen_position};
use crate::transition::{
    DoorLatch, NavigationHistory, TransitionCooldown, TransitionKind, TransitionManager,
    TransitionRequest, WorldEnteredEvent, WorldLoadFailed, WorldRoute, plan_arrival,
};
use crate::world::{
    BackgroundBuilder, Door, DoorKind, WorldConfig, WorldLoadError, WorldLoader, WorldRuntime,
    spawn_world,
};

type LoadResult = Result<WorldConfig, WorldLoadError>;

/// The config read currently in flight, if any.
#[derive(Resource, Default)]
pub struct PendingWorldLoad {
    load: Option<(TransitionRequest, Task<LoadResult>)>,
}

impl PendingWorldLoad {
    pub fn is_loading(&self) -> bool {
        self.load.is_some()
    }

    pub fn request(&self) -> Option<&TransitionRequest> {
        self.load.as_ref().map(|(request, _)| request)
    }

    /// Drop the in-flight read; the task is cancelled with it.
    pub fn cancel(&mut self) -> Option<TransitionRequest> {
        self.load.take().map(|(request, _)| request)
    }
}

/// Resources needed to tear down one world and build the next.
#[derive(SystemParam)]
pub(crate) struct WorldBuilder<'w> {
    registry: ResMut<'w, BodyRegistry>,
    loader: Res<'w, WorldLoader>,
    catalog: Res<'w, ProjectCatalog>,
    store: Res<'w, MysteryBoxStates>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<ColorMaterial>>,
    asset_server: Res<'w, AssetServer>,
    current: Option<ResMut<'w, WorldRuntime>>,
}

impl WorldBuilder<'_> {
    fn rebuild(&mut self, commands: &mut Commands, config: &WorldConfig) -> WorldRuntime {
        if let Some(current) = self.current.as_mut() {
            current.destroy(commands, &mut self.registry);
        }
        let mut background = BackgroundBuilder {
            meshes: &mut self.meshes,
            materials: &mut self.materials,
            asset_server: &self.asset_server,
            assets_root: self.loader.assets_root(),
            world_dir: Path::new("configs").join(&config.id),
        };
        spawn_world(
            commands,
            &mut self.registry,
            config,
            &self.catalog,
            &self.store,
            &mut background,
        )
    }
}

/// Everything touched when the player arrives in the new world.
#[derive(SystemParam)]
pub(crate) struct Arrival<'w, 's> {
    player: Query<
        'w,
        's,
        (
            Entity,
            &'static mut Transform,
            &'static mut LinearVelocity,
            &'static mut Character,
            &'static mut Visibility,
        ),
        With<Player>,
    >,
    respawn_point: ResMut<'w, RespawnPoint>,
    tuning: Res<'w, CharacterTuning>,
    rig: ResMut<'w, CameraRig>,
    pad: Res<'w, TouchPad>,
    history: ResMut<'w, NavigationHistory>,
    cooldown: ResMut<'w, TransitionCooldown>,
    latch: ResMut<'w, DoorLatch>,
    windows: Query<'w, 's, &'static mut Window, With<PrimaryWindow>>,
    entered: MessageWriter<'w, WorldEnteredEvent>,
}

/// First world: the launch route if it names one, otherwise the hub.
pub(crate) fn request_initial_world(
    options: Res<LaunchOptions>,
    settings: Res<RuntimeSettings>,
    mut requests: MessageWriter<TransitionRequest>,
) {
    let request = match WorldRoute::parse(&options.initial_query()) {
        Some(route) => {
            info!("[TRANSITION] Launch route {}", route);
            TransitionRequest::new(route.world.clone(), TransitionKind::Url)
                .with_spawn(route.spawn())
        }
        None => TransitionRequest::new(settings.hub_world.clone(), TransitionKind::Initial),
    };
    requests.write(request);
}

pub(crate) fn request_hub_on_reset(
    mut resets: MessageReader<ResetRequest>,
    settings: Res<RuntimeSettings>,
    mut requests: MessageWriter<TransitionRequest>,
) {
    if resets.read().count() > 0 {
        requests.write(TransitionRequest::new(
            settings.hub_world.clone(),
            TransitionKind::Reset,
        ));
    }
}

/// Alt+Left / Alt+Right walk the navigation history. The cursor itself only
/// moves when the load lands.
pub(crate) fn navigate_history(
    input: Res<InputState>,
    paused: Res<GameplayPaused>,
    manager: Res<TransitionManager>,
    mut history: ResMut<NavigationHistory>,
    mut requests: MessageWriter<TransitionRequest>,
) {
    if paused.is_paused() || manager.is_transitioning() {
        return;
    }
    let route = if input.was_just_pressed(Action::NavigateBack) {
        history.back().cloned()
    } else if input.was_just_pressed(Action::NavigateForward) {
        history.forward().cloned()
    } else {
        return;
    };
    let Some(route) = route else {
        debug!("[TRANSITION] No history entry in that direction");
        return;
    };

    // A position saved on leaving wins over the one baked into the entry.
    let spawn = match manager.saved_position(&route.world) {
        Some(_) => None,
        None => route.spawn(),
    };
    requests.write(TransitionRequest::new(route.world, TransitionKind::History).with_spawn(spawn));
}

/// Claim the manager and start reading the target config off-thread.
pub(crate) fn start_transitions(
    mut requests: MessageReader<TransitionRequest>,
    mut manager: ResMut<TransitionManager>,
    mut pending: ResMut<PendingWorldLoad>,
    loader: Res<WorldLoader>,
    player: Query<&Transform, (With<Player>, Without<AwaitingSpawn>)>,
) {
    for request in requests.read() {
        if request.kind == TransitionKind::Reset
            && let Some(dropped) = pending.cancel()
        {
            manager.abort();
            info!(
                "[TRANSITION] Reset pre-empts the load of '{}'",
                dropped.target
            );
        }
        if !manager.begin(request) {
            continue;
        }

        if request.kind == TransitionKind::Reset {
            manager.reset_positions();
        } else if let Ok(transform) = player.single() {
            manager.save_position(screen_position(transform));
        }

        info!(
            "[TRANSITION] {} -> '{}' ({})",
            manager.current_world_id.as_deref().unwrap_or("<none>"),
            request.target,
            request.kind.label()
        );

        let loader = loader.clone();
        let target = request.target.clone();
        let task = AsyncComputeTaskPool::get().spawn(async move { loader.load(&target) });
        pending.load = Some((request.clone(), task));
    }
}

/// Once the config read resolves, swap worlds and place the player.
pub(crate) fn finish_world_load(
    mut commands: Commands,
    mut pending: ResMut<PendingWorldLoad>,
    mut manager: ResMut<TransitionManager>,
    settings: Res<RuntimeSettings>,
    mut builder: WorldBuilder,
    mut arrival: Arrival,
    mut requests: MessageWriter<TransitionRequest>,
    mut failures: MessageWriter<WorldLoadFailed>,
) {
    let Some((_, task)) = pending.load.as_mut() else {
        return;
    };
    let Some(result) = block_on(future::poll_once(task)) else {
        return;
    };
    let Some((request, _)) = pending.load.take() else {
        return;
    };

    let config = match result {
        Ok(config) => config,
        Err(e) => {
            error!("[TRANSITION] {} - staying where we are", e);
            manager.abort();
            if request.kind == TransitionKind::History {
                arrival.history.cancel();
            }
            let stranded = manager.current_world_id.is_none();
            let fallback = stranded && request.target != settings.hub_world;
            if fallback {
                warn!(
                    "[TRANSITION] No world loaded yet, falling back to hub '{}'",
                    settings.hub_world
                );
                requests.write(TransitionRequest::new(
                    settings.hub_world.clone(),
                    TransitionKind::Initial,
                ));
            }
            failures.write(WorldLoadFailed {
                world_id: e.world_id().to_string(),
                reason: e.to_string(),
                fatal: stranded && !fallback,
            });
            return;
        }
    };

    let runtime = builder.rebuild(&mut commands, &config);

    let plan = plan_arrival(
        &manager,
        &request,
        &settings,
        &config,
        &arrival.rig,
        arrival.pad.enabled,
    );
    let spawn = plan.spawn;

    for (entity, mut transform, mut velocity, mut character, mut visibility) in &mut arrival.player
    {
        respawn_character(&mut transform, &mut velocity, &mut character, spawn);
        *visibility = Visibility::Inherited;
        commands.entity(entity).remove::<AwaitingSpawn>();
    }

    *arrival.respawn_point = RespawnPoint {
        spawn: plan.respawn,
        death_y: config.dimensions.ground_level + arrival.tuning.death_offset,
    };

    arrival.rig.set_bounds(runtime.bounds());
    arrival.rig.snap_to(plan.camera);

    let route = match request.spawn {
        Some(position) => WorldRoute::new(config.id.clone()).with_position(position.as_ivec2()),
        None => WorldRoute::new(config.id.clone()),
    };
    if request.kind.pushes_history() {
        arrival.history.push(route);
    } else if request.kind == TransitionKind::History {
        arrival.history.settle();
    } else {
        arrival.history.replace(route);
    }

    if let Ok(mut window) = arrival.windows.single_mut() {
        window.title = format!("{} | Shore", config.name);
    }

    arrival.cooldown.reset();
    arrival.latch.clear();
    manager.complete(config.id.clone());

    info!(
        "[TRANSITION] Entered '{}' at ({:.0}, {:.0})",
        config.id, spawn.x, spawn.y
    );
    arrival.entered.write(WorldEnteredEvent {
        world_id: config.id.clone(),
        name: config.name.clone(),
        spawn,
        kind: request.kind,
    });
    commands.insert_resource(runtime);
}

/// Fire a door the player has just walked into.
pub(crate) fn check_door_collisions(
    time: Res<Time>,
    manager: Res<TransitionManager>,
    tuning: Res<CharacterTuning>,
    mut cooldown: ResMut<TransitionCooldown>,
    mut latch: ResMut<DoorLatch>,
    player: Query<(&Transform, &Character), (With<Player>, Without<AwaitingSpawn>)>,
    doors: Query<(Entity, &Door)>,
    mut requests: MessageWriter<TransitionRequest>,
) {
    cooldown.tick(time.delta());
    let Ok((transform, character)) = player.single() else {
        return;
    };
    if character.is_frozen() {
        return;
    }

    let body = Aabb::from_center(screen_position(transform), tuning.size());
    let overlapping = doors.iter().find(|(_, door)| door.overlaps(&body));
    let armed = cooldown.can_transition() && !manager.is_transitioning();
    if !latch.observe(overlapping.map(|(entity, _)| entity), armed) {
        return;
    }
    let Some((_, door)) = overlapping else {
        return;
    };

    let kind = match door.kind {
        DoorKind::Entry => TransitionKind::Entry,
        DoorKind::Exit => TransitionKind::Exit,
    };
    info!(
        "[TRANSITION] Door '{}' ({}) -> '{}'",
        door.key, door.name, door.target_world
    );
    requests.write(TransitionRequest::new(door.target_world.clone(), kind).with_spawn(door.spawn));
}
