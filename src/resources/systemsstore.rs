//! Registry of scene hooks.
//!
//! One-shot systems registered with [`World::register_system`] are stored
//! under the names the scene observer looks up (`"setup"`, `"enter_menu"`,
//! `"enter_level"`, `"quit_game"`) and run through [`Commands::run_system`].
//!
//! [`World::register_system`]: bevy_ecs::world::World::register_system
//! [`Commands::run_system`]: bevy_ecs::system::Commands::run_system

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

#[derive(Resource, Default)]
pub struct SystemsStore {
    pub map: FxHashMap<String, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        SystemsStore {
            map: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<SystemId> {
        self.map.get(name.as_ref()).copied()
    }
}
