//! Character domain: movement and life-cycle events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Normal,
    Double,
}

#[derive(Debug)]
pub struct JumpEvent {
    pub kind: JumpKind,
    pub position: Vec2,
}

impl Message for JumpEvent {}

#[derive(Debug)]
pub struct LandEvent {
    pub position: Vec2,
}

impl Message for LandEvent {}

#[derive(Debug)]
pub struct DeathEvent {
    pub respawns: u32,
    pub position: Vec2,
}

impl Message for DeathEvent {}

#[derive(Debug)]
pub struct RespawnEvent {
    pub position: Vec2,
}

impl Message for RespawnEvent {}
