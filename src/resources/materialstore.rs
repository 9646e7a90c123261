//! Named material colours.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Color;
use rustc_hash::FxHashMap;

/// Colour used for unknown material names.
pub const MISSING_MATERIAL: Color = Color::new(255, 0, 255, 255);

#[derive(Resource, Clone)]
pub struct MaterialStore {
    pub map: FxHashMap<String, Color>,
}

impl Default for MaterialStore {
    fn default() -> Self {
        let mut store = MaterialStore {
            map: FxHashMap::default(),
        };
        store.insert("ground", Color::new(110, 140, 90, 255));
        store.insert("stone", Color::new(130, 130, 140, 255));
        store.insert("stone_transparent", Color::new(130, 130, 140, 90));
        store.insert("wood", Color::new(150, 105, 60, 255));
        store.insert("wood_transparent", Color::new(150, 105, 60, 90));
        store.insert("player", Color::new(60, 110, 200, 255));
        store.insert("teleporter", Color::new(170, 80, 220, 120));
        store.insert("text_trigger", Color::new(240, 200, 60, 80));
        store
    }
}

impl MaterialStore {
    pub fn insert(&mut self, name: impl Into<String>, color: Color) {
        self.map.insert(name.into(), color);
    }

    pub fn get(&self, name: &str) -> Color {
        self.map.get(name).copied().unwrap_or(MISSING_MATERIAL)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_material_falls_back() {
        let store = MaterialStore::default();
        let c = store.get("nope");
        assert_eq!((c.r, c.g, c.b, c.a), (255, 0, 255, 255));
        assert!(store.contains("stone_transparent"));
    }
}
