//! ProjectCatalog resource providing ordered lookups for loaded projects.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::ProjectDef;

/// All projects in file order, indexed by id.
#[derive(Resource, Debug, Default)]
pub struct ProjectCatalog {
    items: Vec<ProjectDef>,
    index: HashMap<String, usize>,
}

impl ProjectCatalog {
    /// Build from a list; later duplicates of an id are dropped.
    pub fn from_items(items: Vec<ProjectDef>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            if catalog.index.contains_key(&item.id) {
                continue;
            }
            catalog.index.insert(item.id.clone(), catalog.items.len());
            catalog.items.push(item);
        }
        catalog
    }

    pub fn get(&self, id: &str) -> Option<&ProjectDef> {
        self.index.get(id).map(|i| &self.items[*i])
    }

    /// Projects revealed in `world_id`, in file order.
    pub fn for_world<'a>(&'a self, world_id: &'a str) -> impl Iterator<Item = &'a ProjectDef> {
        self.items.iter().filter(move |p| p.world == world_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectDef> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
