//! Input domain: the per-tick action snapshot and its edge detection.

use bevy::prelude::*;
use std::collections::HashSet;

/// Every signal the runtime reads from the player, keyboard or touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Jump,
    ToggleDebug,
    ToggleGrid,
    ToggleMute,
    VolumeUp,
    VolumeDown,
    StartMusic,
    Reset,
    CloseModal,
    NavigateBack,
    NavigateForward,
}

/// Flat set of actions held during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSet(HashSet<Action>);

impl ActionSet {
    pub fn insert(&mut self, action: Action) {
        self.0.insert(action);
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Current and previous snapshots. Only one snapshot is taken per tick, so a
/// key that flickers within a frame is seen at most once.
#[derive(Resource, Debug, Default)]
pub struct InputState {
    current: ActionSet,
    previous: ActionSet,
    consumed: HashSet<Action>,
}

impl InputState {
    /// Replace the snapshot for a new tick.
    pub fn advance(&mut self, next: ActionSet) {
        self.previous = std::mem::replace(&mut self.current, next);
        self.consumed.clear();
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.current.contains(action)
    }

    /// Rising edge this tick, unless something already consumed it.
    pub fn was_just_pressed(&self, action: Action) -> bool {
        self.current.contains(action)
            && !self.previous.contains(action)
            && !self.consumed.contains(&action)
    }

    /// Suppress `action`'s edge for the rest of this tick.
    pub fn consume(&mut self, action: Action) {
        self.consumed.insert(action);
    }

    /// -1 (left), 0, or +1 (right).
    pub fn horizontal_axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.is_pressed(Action::Left) {
            axis -= 1.0;
        }
        if self.is_pressed(Action::Right) {
            axis += 1.0;
        }
        axis
    }

    /// True on the first tick anything at all is newly pressed.
    pub fn any_just_pressed(&self) -> bool {
        self.current.0.iter().any(|a| !self.previous.contains(*a))
    }
}
