//! Transition domain: `?world=<id>&x=<int>&y=<int>` routes and the history
//! stack that back/forward walk.

use bevy::prelude::*;
use std::fmt;

/// A world plus an optional integer spawn, as carried in a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldRoute {
    pub world: String,
    pub position: Option<IVec2>,
}

impl WorldRoute {
    pub fn new(world: impl Into<String>) -> Self {
        Self {
            world: world.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, position: IVec2) -> Self {
        self.position = Some(position);
        self
    }

    /// Parse a query string. A leading `?`, unknown keys and any key order are
    /// accepted; `x` and `y` only count when both are integers.
    pub fn parse(query: &str) -> Option<Self> {
        let query = query.trim();
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut world = None;
        let mut x = None;
        let mut y = None;
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "world" if !value.is_empty() => world = Some(value.to_string()),
                "x" => x = value.parse::<i32>().ok(),
                "y" => y = value.parse::<i32>().ok(),
                _ => {}
            }
        }

        let position = match (x, y) {
            (Some(x), Some(y)) => Some(IVec2::new(x, y)),
            _ => None,
        };
        world.map(|world| Self { world, position })
    }

    /// Spawn in screen space, if the route carries one.
    pub fn spawn(&self) -> Option<Vec2> {
        self.position.map(|p| p.as_vec2())
    }
}

impl fmt::Display for WorldRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?world={}", self.world)?;
        if let Some(position) = self.position {
            write!(f, "&x={}&y={}", position.x, position.y)?;
        }
        Ok(())
    }
}

/// Browser-style history: pushing drops anything ahead of the cursor.
/// Back/forward only name a target; the cursor moves once that world has
/// loaded.
#[derive(Resource, Debug, Default)]
pub struct NavigationHistory {
    entries: Vec<WorldRoute>,
    cursor: usize,
    pending: Option<usize>,
}

impl NavigationHistory {
    pub fn push(&mut self, route: WorldRoute) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(route);
        self.cursor = self.entries.len() - 1;
        self.pending = None;
    }

    /// Overwrite the current entry (or seed an empty history).
    pub fn replace(&mut self, route: WorldRoute) {
        self.pending = None;
        match self.entries.get_mut(self.cursor) {
            Some(entry) => *entry = route,
            None => self.push(route),
        }
    }

    pub fn back(&mut self) -> Option<&WorldRoute> {
        let target = self.cursor.checked_sub(1)?;
        self.aim(target)
    }

    pub fn forward(&mut self) -> Option<&WorldRoute> {
        self.aim(self.cursor + 1)
    }

    fn aim(&mut self, target: usize) -> Option<&WorldRoute> {
        let route = self.entries.get(target)?;
        self.pending = Some(target);
        Some(route)
    }

    /// The world named by the last back/forward loaded: move onto it.
    pub fn settle(&mut self) {
        if let Some(target) = self.pending.take()
            && target < self.entries.len()
        {
            self.cursor = target;
        }
    }

    /// The last back/forward never arrived; the cursor stays put.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn current(&self) -> Option<&WorldRoute> {
        self.entries.get(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
