//! Interaction domain: box, collectible and modal events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug)]
pub struct BoxHitEvent {
    pub box_id: String,
    /// Screen-space center of the box
    pub position: Vec2,
}

impl Message for BoxHitEvent {}

#[derive(Debug)]
pub struct CollectibleCollectedEvent {
    pub box_id: String,
    /// Screen-space center of the collectible
    pub position: Vec2,
}

impl Message for CollectibleCollectedEvent {}

#[derive(Debug)]
pub struct ModalOpenedEvent {
    pub project_id: String,
}

impl Message for ModalOpenedEvent {}

#[derive(Debug)]
pub struct ModalClosedEvent {
    pub project_id: String,
}

impl Message for ModalClosedEvent {}

/// Clear every box, close the modal and return to the hub spawn.
#[derive(Debug, Default)]
pub struct ResetRequest;

impl Message for ResetRequest {}
