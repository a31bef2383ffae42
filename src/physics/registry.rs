//! Body registry: maps named bodies to the entities that own them.
//!
//! Every body the runtime creates goes through [`spawn_body`] so that teardown
//! can find it again by id, and collision code can go from an entity back to
//! the game object id without entity back-references.

use bevy::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

/// What kind of game object a physics body belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyLabel {
    Platform,
    Boundary,
    MysteryBox,
    Collectible,
    Door,
    Player,
}

/// The registry id stored on the body entity itself.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct BodyTag(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BodyRegistryError {
    #[error("body '{0}' is already registered")]
    DuplicateBody(String),
    #[error("body '{0}' is not registered")]
    MissingBody(String),
}

#[derive(Resource, Debug, Default)]
pub struct BodyRegistry {
    by_id: HashMap<String, (Entity, BodyLabel)>,
    by_entity: HashMap<Entity, String>,
}

impl BodyRegistry {
    pub fn add_body(
        &mut self,
        id: impl Into<String>,
        label: BodyLabel,
        entity: Entity,
    ) -> Result<(), BodyRegistryError> {
        let id = id.into();
        if self.by_id.contains_key(&id) {
            return Err(BodyRegistryError::DuplicateBody(id));
        }
        self.by_entity.insert(entity, id.clone());
        self.by_id.insert(id, (entity, label));
        Ok(())
    }

    pub fn remove_body(&mut self, id: &str) -> Result<Entity, BodyRegistryError> {
        let (entity, _) = self
            .by_id
            .remove(id)
            .ok_or_else(|| BodyRegistryError::MissingBody(id.to_string()))?;
        self.by_entity.remove(&entity);
        Ok(entity)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn entity(&self, id: &str) -> Option<Entity> {
        self.by_id.get(id).map(|(entity, _)| *entity)
    }

    pub fn label(&self, id: &str) -> Option<BodyLabel> {
        self.by_id.get(id).map(|(_, label)| *label)
    }

    /// Reverse lookup from entity to body id.
    pub fn body_of(&self, entity: Entity) -> Option<&str> {
        self.by_entity.get(&entity).map(String::as_str)
    }

    pub fn labelled(&self, label: BodyLabel) -> impl Iterator<Item = (&str, Entity)> {
        self.by_id
            .iter()
            .filter(move |(_, (_, l))| *l == label)
            .map(|(id, (entity, _))| (id.as_str(), *entity))
    }

    pub fn count(&self, label: BodyLabel) -> usize {
        self.labelled(label).count()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Spawn `bundle` as a labelled body and register it under `id`.
///
/// A duplicate id is logged and nothing is spawned.
pub fn spawn_body<B: Bundle>(
    commands: &mut Commands,
    registry: &mut BodyRegistry,
    id: impl Into<String>,
    label: BodyLabel,
    bundle: B,
) -> Option<Entity> {
    let id = id.into();
    if registry.contains(&id) {
        warn!(
            "[PHYSICS] {}",
            BodyRegistryError::DuplicateBody(id.clone())
        );
        return None;
    }

    let entity = commands.spawn((bundle, label, BodyTag(id.clone()))).id();
    match registry.add_body(id, label, entity) {
        Ok(()) => Some(entity),
        Err(e) => {
            warn!("[PHYSICS] {}", e);
            commands.entity(entity).despawn();
            None
        }
    }
}

/// Unregister and despawn the body `id`. A missing id is logged and ignored.
pub fn despawn_body(commands: &mut Commands, registry: &mut BodyRegistry, id: &str) {
    match registry.remove_body(id) {
        Ok(entity) => {
            if let Ok(mut entity_commands) = commands.get_entity(entity) {
                entity_commands.despawn();
            }
        }
        Err(e) => warn!("[PHYSICS] {}", e),
    }
}
